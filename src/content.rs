//! Static page content: reviews, dishes, gallery and contact details.
//!
//! Defaults carry the restaurant's own lists. A TOML file can replace any of
//! them; keys it leaves out keep their default.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::TimingFile;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub attribution: String,
}

impl Testimonial {
    pub fn new(quote: impl Into<String>, attribution: impl Into<String>) -> Self {
        Self {
            quote: quote.into(),
            attribution: attribution.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: String,
    /// Image reference; the viewer looks for `<id>.<ext>` in its image directory.
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub hours: String,
    pub instagram: String,
    pub maps: String,
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            email: "hello@anandobrahma.in".into(),
            phone: "+91 99999 99999".into(),
            address: "Anandobrahma Fine Dine, Satyam Theatre Road, Hyderabad".into(),
            hours: "12:00 PM – 11:30 PM (All days)".into(),
            instagram: "https://instagram.com/anandobrahmahyderabad".into(),
            maps: "https://www.google.com/maps?q=Anandobrahma+Fine+Dine+Restaurant+Hyderabad".into(),
        }
    }
}

/// Sections reachable from the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Menu,
    Reserve,
    Gallery,
    Reviews,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Menu,
        Section::Reserve,
        Section::Gallery,
        Section::Reviews,
        Section::Contact,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Menu => "menu",
            Section::Reserve => "reserve",
            Section::Gallery => "gallery",
            Section::Reviews => "reviews",
            Section::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Menu => "Menu",
            Section::Reserve => "Reserve",
            Section::Gallery => "Gallery",
            Section::Reviews => "Reviews",
            Section::Contact => "Contact",
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub brand: String,
    pub tagline: String,
    pub chips: Vec<String>,
    pub testimonials: Vec<Testimonial>,
    pub dishes: Vec<Dish>,
    pub gallery: Vec<String>,
    pub contact: Contact,
}

impl Default for Content {
    fn default() -> Self {
        Self {
            brand: "ANANDOBRAHMA".into(),
            tagline: "Fine Dine Restaurant".into(),
            chips: ["Authentic Indian", "Hyderabadi Biryani", "Mandi Special", "Family Dining"]
                .map(String::from)
                .to_vec(),
            testimonials: vec![
                Testimonial::new(
                    "The best Hyderabadi biryani I’ve had in years. Perfect spice balance!",
                    "— Rohan S.",
                ),
                Testimonial::new(
                    "Mandi platter was generous and incredibly juicy. Family loved it.",
                    "— Afreen K.",
                ),
                Testimonial::new(
                    "Silky butter chicken and soft naans. Service was quick!",
                    "— Vivek T.",
                ),
            ],
            dishes: default_dishes(),
            gallery: (1..=6).map(|i| format!("gallery-{i}")).collect(),
            contact: Contact::default(),
        }
    }
}

impl Content {
    /// Footer line for the given calendar year.
    pub fn copyright(&self, year: i32) -> String {
        format!("© {year} {}", self.brand)
    }
}

fn dish(id: &str, name: &str, price: &str, description: &str) -> Dish {
    Dish {
        id: id.into(),
        name: name.into(),
        price: price.into(),
        description: description.into(),
        image: format!("{id}.jpg"),
    }
}

fn default_dishes() -> Vec<Dish> {
    vec![
        dish(
            "biryani-chicken",
            "Chicken Dum Biryani",
            "₹279 / ₹349",
            "Aromatic basmati, saffron and juicy chicken cooked on dum.",
        ),
        dish(
            "mutton-mandi",
            "Mutton Mandi",
            "₹1099 (for 2)",
            "Slow-roasted mutton served on fragrant mandi rice.",
        ),
        dish(
            "butter-chicken",
            "Butter Chicken",
            "₹349",
            "Silky tomato-butter gravy with tender chicken.",
        ),
        dish(
            "paneer-butter",
            "Paneer Butter Masala",
            "₹319",
            "Creamy, rich and best with butter naan.",
        ),
        dish(
            "veg-biryani",
            "Veg Biryani",
            "₹239 / ₹299",
            "Garden-fresh veggies layered with spiced rice.",
        ),
        dish(
            "garlic-naan",
            "Garlic Naan",
            "₹79",
            "Fluffy naan with butter and roasted garlic.",
        ),
    ]
}

/// On-disk layout of a content file. Every table is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContentFile {
    pub brand: Option<String>,
    pub tagline: Option<String>,
    pub chips: Option<Vec<String>>,
    pub testimonials: Option<Vec<Testimonial>>,
    pub dishes: Option<Vec<Dish>>,
    pub gallery: Option<Vec<String>>,
    pub contact: Option<Contact>,
    pub timing: TimingFile,
}

impl ContentFile {
    pub fn parse(raw: &str, path: &Path) -> Result<Self> {
        toml::from_str(raw).map_err(|source| Error::ParseContent {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn read(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::ReadContent {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    /// Overlays the file onto the defaults.
    pub fn into_content(self) -> Result<Content> {
        let defaults = Content::default();
        let testimonials = self.testimonials.unwrap_or(defaults.testimonials);
        if testimonials.is_empty() {
            return Err(Error::EmptyCarousel);
        }
        Ok(Content {
            brand: self.brand.unwrap_or(defaults.brand),
            tagline: self.tagline.unwrap_or(defaults.tagline),
            chips: self.chips.unwrap_or(defaults.chips),
            testimonials,
            dishes: self.dishes.unwrap_or(defaults.dishes),
            gallery: self.gallery.unwrap_or(defaults.gallery),
            contact: self.contact.unwrap_or(defaults.contact),
        })
    }
}
