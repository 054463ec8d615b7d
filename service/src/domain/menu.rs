//! [`Food`] definitions.

use std::str::FromStr;

use common::Money;
use derive_more::{AsRef, Debug, Display};

use super::define_text;

/// Food item offered on the menu.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Food {
    /// ID of this [`Food`].
    pub id: Id,

    /// [`Name`] of this [`Food`].
    pub name: Name,

    /// Unit price of this [`Food`].
    pub price: Money,

    /// [`Description`] of this [`Food`].
    pub description: Description,

    /// [`Category`] this [`Food`] belongs to.
    pub category: Category,

    /// [`ImageUrl`] of this [`Food`] picture.
    pub image_url: ImageUrl,
}

/// [`Food`] contents submitted on creation or update.
#[derive(Clone, Debug)]
pub struct Draft {
    /// [`Name`] of the [`Food`].
    pub name: Name,

    /// Unit price of the [`Food`].
    pub price: Money,

    /// [`Description`] of the [`Food`].
    pub description: Description,

    /// [`Category`] of the [`Food`].
    pub category: Category,

    /// [`Image`] of the [`Food`].
    pub image: Image,
}

/// [`Draft`] replacing the contents of an existing [`Food`].
#[derive(Clone, Debug)]
pub struct Edit {
    /// ID of the [`Food`] being edited.
    pub id: Id,

    /// New contents of the [`Food`].
    pub draft: Draft,
}

/// Picture of a [`Food`] being submitted.
#[derive(Clone, Debug)]
pub enum Image {
    /// Newly uploaded picture file.
    Upload(Upload),

    /// Picture already stored by the backend.
    Existing(ImageUrl),
}

/// Picture file uploaded along with a [`Draft`].
#[derive(Clone, Debug)]
pub struct Upload {
    /// Name of the uploaded file.
    pub file_name: String,

    /// Contents of the uploaded file.
    #[debug("{} bytes", bytes.len())]
    pub bytes: Vec<u8>,
}

/// ID of a [`Food`], opaque to the client.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `id` is not blank.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        (!id.trim().is_empty() && id.trim() == id).then_some(Self(id))
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Id`")
    }
}

define_text! {
    /// Name of a [`Food`].
    pub struct Name(max = 256);
}

define_text! {
    /// Description of a [`Food`].
    pub struct Description(max = 2048);
}

define_text! {
    /// Category of a [`Food`].
    pub struct Category(max = 64);
}

impl Category {
    /// Categories offered by the restaurant, as stored by the backend.
    pub const PRESETS: &'static [&'static str] = &[
        "Rice",
        "koththu",
        "Indian Foods",
        "Bekary Item",
        "Hot Bevarages",
        "Others",
    ];
}

define_text! {
    /// Location of a [`Food`] picture.
    pub struct ImageUrl(max = 2048);
}
