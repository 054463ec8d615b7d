//! [`Line`] definitions.

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser};
use common::Money;
use secrecy::{zeroize::Zeroize, SecretBox};
use service::{
    domain::{
        feedback,
        menu::{self, Category},
        order, payment, user, Quantity,
    },
    read::menu::list::{Filter, SearchQuery},
};

use crate::{
    context::{FoodChanges, ImageSource},
    Error,
};

/// Single line entered into the shell.
#[derive(Debug, Parser)]
#[command(multicall = true)]
pub enum Line {
    /// Log in: `login <email> <password>`.
    Login {
        /// Email of the account.
        email: user::Email,

        /// Password of the account.
        #[arg(value_parser = secret::<user::Password>)]
        password: SecretBox<user::Password>,
    },

    /// Log out.
    Logout,

    /// Create a new account.
    Register {
        /// First name.
        #[arg(long)]
        first_name: user::Name,

        /// Last name.
        #[arg(long)]
        last_name: user::Name,

        /// Email to log in with.
        #[arg(long)]
        email: user::Email,

        /// Password, at least 6 characters.
        #[arg(long, value_parser = secret::<user::Password>)]
        password: SecretBox<user::Password>,

        /// Password once again.
        #[arg(long, value_parser = secret::<user::Password>)]
        confirm: SecretBox<user::Password>,

        /// Role of the account.
        #[arg(long, default_value = "USER")]
        role: user::Role,
    },

    /// Show your account.
    Me,

    /// Browse the menu.
    Menu {
        /// Narrowing of the menu.
        #[command(flatten)]
        filter: FilterArgs,

        /// Page to show.
        #[arg(short, long)]
        page: Option<u32>,
    },

    /// List the food categories.
    Categories,

    /// Show the details of the `n`th food on the menu page.
    Show {
        /// Position on the menu page.
        n: usize,
    },

    /// Turn to the next page of the shown list.
    Next,

    /// Turn to the previous page of the shown list.
    #[command(alias = "previous")]
    Prev,

    /// Add the `n`th food on the menu page to the cart.
    Add {
        /// Position on the menu page.
        n: usize,

        /// How many to add, at least 1.
        #[arg(default_value = "1", value_parser = quantity)]
        quantity: Quantity,
    },

    /// Remove the `n`th item from the cart.
    Remove {
        /// Position in the cart.
        n: usize,
    },

    /// Change the quantity of the `n`th cart item.
    #[command(allow_negative_numbers = true)]
    Qty {
        /// Position in the cart.
        n: usize,

        /// New quantity, at least 1.
        quantity: i64,
    },

    /// Show the cart.
    Cart,

    /// Empty the cart.
    Clear,

    /// Order everything in the cart.
    Checkout {
        /// Delivery address.
        #[arg(long)]
        address: order::Address,

        /// `Delivery` or `Take Away`.
        #[arg(long, default_value = "Delivery")]
        kind: order::Kind,

        /// `cod` or `card`, defaults to the one suiting the kind.
        #[arg(long)]
        payment: Option<order::PaymentMethod>,
    },

    /// Pay the amount due by card.
    Pay {
        /// Contact phone number.
        #[arg(long)]
        phone: payment::Phone,

        /// Name on the card.
        #[arg(long)]
        holder: payment::CardHolder,

        /// Card number.
        #[arg(long, value_parser = secret::<payment::CardNumber>)]
        number: SecretBox<payment::CardNumber>,

        /// Expiry as `MM/YY`.
        #[arg(long)]
        expiry: payment::Expiry,

        /// Verification code.
        #[arg(long, value_parser = secret::<payment::Cvv>)]
        cvv: SecretBox<payment::Cvv>,
    },

    /// Show your orders.
    MyOrders,

    /// Leave feedback.
    Review {
        /// Stars, from 1 to 5.
        #[arg(long)]
        rating: feedback::Rating,

        /// What you think.
        #[arg(long)]
        text: feedback::Text,

        /// Name to sign with, defaults to yours.
        #[arg(long)]
        name: Option<feedback::CustomerName>,

        /// Contact email, defaults to yours.
        #[arg(long)]
        email: Option<user::Email>,
    },

    /// Browse the feedback wall.
    Feedback {
        /// Page to show.
        #[arg(short, long)]
        page: Option<u32>,
    },

    /// Manage the menu foods (admin).
    Foods {
        /// Narrowing of the foods.
        #[command(flatten)]
        filter: FilterArgs,

        /// Page to show.
        #[arg(short, long)]
        page: Option<u32>,
    },

    /// Add a new food to the menu (admin).
    NewFood {
        /// Fields of the food.
        #[command(flatten)]
        fields: FoodFields,
    },

    /// Edit the `n`th food of the admin grid (admin).
    EditFood {
        /// Position on the admin grid.
        n: usize,

        /// Fields to change.
        #[command(flatten)]
        fields: FoodFields,
    },

    /// Delete the `n`th food of the admin grid (admin).
    DeleteFood {
        /// Position on the admin grid.
        n: usize,
    },

    /// Confirm the pending action.
    #[command(alias = "y")]
    Yes,

    /// Cancel the pending action.
    #[command(alias = "n")]
    No,

    /// Browse all the orders (admin).
    Orders {
        /// Page to show.
        #[arg(short, long)]
        page: Option<u32>,
    },

    /// Change the status of the `n`th order on the page (admin).
    Status {
        /// Position on the orders page.
        n: usize,

        /// `pending`, `success` or `cancelled`.
        status: order::Status,
    },

    /// Download the PDF report over all the orders (admin).
    Report {
        /// File to save the report to.
        #[arg(default_value = "orders-report.pdf")]
        path: PathBuf,
    },

    /// Leave the shell.
    #[command(alias = "quit")]
    Exit,
}

/// Narrowing of a food list.
#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Show the given category only.
    #[arg(short, long)]
    category: Option<Category>,

    /// Search for the given text.
    #[arg(short, long)]
    search: Option<SearchQuery>,

    /// Drop any narrowing.
    #[arg(long, conflicts_with_all = ["category", "search"])]
    all: bool,
}

impl FilterArgs {
    /// Returns the [`Filter`] to apply, if any is given.
    #[must_use]
    pub fn into_filter(self) -> Option<Filter> {
        let Self {
            category,
            search,
            all,
        } = self;
        if all {
            return Some(Filter::All);
        }
        (category.is_some() || search.is_some())
            .then(|| Filter::new(category, search))
    }
}

/// Fields of a menu food.
#[derive(Args, Clone, Debug, Default)]
pub struct FoodFields {
    /// Name of the food.
    #[arg(long)]
    name: Option<menu::Name>,

    /// Price, like `1250` or `Rs. 1,250.00`.
    #[arg(long, value_parser = price)]
    price: Option<Money>,

    /// Description of the food.
    #[arg(long)]
    description: Option<menu::Description>,

    /// Category of the food.
    #[arg(long)]
    category: Option<Category>,

    /// Picture file to upload.
    #[arg(long, conflicts_with = "image_url")]
    image: Option<PathBuf>,

    /// Location of an already stored picture.
    #[arg(long)]
    image_url: Option<menu::ImageUrl>,
}

impl From<FoodFields> for FoodChanges {
    fn from(fields: FoodFields) -> Self {
        let FoodFields {
            name,
            price,
            description,
            category,
            image,
            image_url,
        } = fields;
        Self {
            name,
            price,
            description,
            category,
            image: image
                .map(ImageSource::File)
                .or(image_url.map(ImageSource::Url)),
        }
    }
}

/// Parses a value kept in a [`SecretBox`].
fn secret<T>(s: &str) -> Result<SecretBox<T>, T::Err>
where
    T: FromStr + Zeroize,
{
    s.parse().map(|v| SecretBox::new(Box::new(v)))
}

/// Parses a positive [`Quantity`], refusing to clamp.
fn quantity(s: &str) -> Result<Quantity, &'static str> {
    s.trim()
        .parse()
        .ok()
        .and_then(Quantity::new)
        .ok_or("quantity must be a whole number of at least 1")
}

/// Parses a price leniently, ignoring any currency and separators.
fn price(s: &str) -> Result<Money, &'static str> {
    Money::try_parse_lenient(s).ok_or("price must be a non-negative amount")
}

/// Splits the `line` into words the way a POSIX shell does.
///
/// Words are separated by unquoted whitespace. Single quotes preserve
/// everything literally, double quotes allow escaping `"` and `\` only,
/// and a backslash outside quotes escapes any character.
///
/// # Errors
///
/// If a quote is not closed or the `line` ends with a backslash.
pub fn split(line: &str) -> Result<Vec<String>, Error> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quote = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') | (Some('"'), '"') => quote = None,
            (Some('"'), '\\') => match chars.next() {
                Some(e @ ('"' | '\\')) => word.push(e),
                Some(e) => {
                    word.push('\\');
                    word.push(e);
                }
                None => break,
            },
            (Some(_), c) => word.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, '\\') => {
                let Some(e) = chars.next() else {
                    return Err(Error::invalid_input(
                        &"Line ends with a dangling `\\`",
                    ));
                };
                word.push(e);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            (None, c) => {
                word.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(Error::invalid_input(&format!("Unclosed `{q}` quote")));
    }
    if in_word {
        words.push(word);
    }
    Ok(words)
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;
    use service::{domain::order, read::menu::list::Filter};

    use super::{split, Line};

    fn parse(line: &str) -> Line {
        Line::try_parse_from(split(line).unwrap()).unwrap()
    }

    #[test]
    fn splits_words() {
        assert_eq!(split("  add  3 2 ").unwrap(), ["add", "3", "2"]);
        assert!(split("   ").unwrap().is_empty());
    }

    #[test]
    fn keeps_quoted_whitespace() {
        assert_eq!(
            split(r#"checkout --address "12 Galle Road" --kind 'take away'"#)
                .unwrap(),
            ["checkout", "--address", "12 Galle Road", "--kind", "take away"],
        );
        assert_eq!(split(r#"say "" x"#).unwrap(), ["say", "", "x"]);
    }

    #[test]
    fn handles_escapes() {
        assert_eq!(
            split(r#"say "a \"b\" \n" c\ d 'e\f'"#).unwrap(),
            ["say", r#"a "b" \n"#, "c d", r"e\f"],
        );
    }

    #[test]
    fn rejects_unclosed_quote() {
        assert_eq!(
            split(r#"review --text "great"#).unwrap_err().code,
            "INVALID_INPUT",
        );
        assert_eq!(split(r"add 1 \").unwrap_err().code, "INVALID_INPUT");
    }

    #[test]
    fn parses_checkout() {
        let Line::Checkout {
            address,
            kind,
            payment,
        } = parse(r#"checkout --address "12 Galle Road" --kind "take away""#)
        else {
            panic!("not a checkout");
        };

        assert_eq!(AsRef::<str>::as_ref(&address), "12 Galle Road");
        assert_eq!(kind, order::Kind::TakeAway);
        assert_eq!(payment, None);
    }

    #[test]
    fn parses_filter() {
        let Line::Menu { filter, page } = parse("menu -c Rice -p 2") else {
            panic!("not a menu");
        };
        assert_eq!(page, Some(2));
        assert!(matches!(filter.into_filter(), Some(Filter::Category(_))));

        let Line::Menu { filter, .. } = parse("menu") else {
            panic!("not a menu");
        };
        assert_eq!(filter.into_filter(), None);

        assert!(Line::try_parse_from(["menu", "--all", "-c", "Rice"]).is_err());
    }

    #[test]
    fn parses_add_quantity() {
        assert!(matches!(
            parse("add 2"),
            Line::Add { n: 2, quantity } if quantity.get() == 1,
        ));
        assert!(matches!(
            parse("add 2 3"),
            Line::Add { n: 2, quantity } if quantity.get() == 3,
        ));
    }

    #[test]
    fn parses_negative_quantity() {
        assert!(matches!(
            parse("qty 2 -5"),
            Line::Qty {
                n: 2,
                quantity: -5,
            },
        ));
    }

    #[test]
    fn hides_secrets() {
        let line = parse("login jane@spoon.lk hunter22");

        assert!(matches!(line, Line::Login { .. }));
        assert!(!format!("{line:?}").contains("hunter22"));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(Line::try_parse_from(["login", "jane", "hunter22"]).is_err());
        assert!(Line::try_parse_from(["add", "1", "0"]).is_err());
        assert!(Line::try_parse_from(["add", "1", "-2"]).is_err());
        assert!(Line::try_parse_from(["new-food", "--price", "free"]).is_err());
        assert!(Line::try_parse_from(["status", "1", "lost"]).is_err());
        assert!(Line::try_parse_from(["frobnicate"]).is_err());
    }
}
