//! Plain-text renderings of the [`Context`] state.
//!
//! [`Context`]: crate::Context

use std::fmt::Write as _;

use common::Money;
use itertools::Itertools as _;
use service::{
    cart::Cart,
    command::place_order,
    domain::{feedback::Rating, menu, Feedback, Food, Order, User},
    List,
};

/// Symbol the restaurant prices are shown with.
const CURRENCY: &str = "Rs.";

/// Maximum number of characters of a [`Feedback`] shown on the wall.
const EXCERPT_LEN: usize = 120;

/// Renders the given amount of [`Money`].
#[must_use]
pub fn money(amount: Money) -> String {
    format!("{CURRENCY} {amount}")
}

/// Renders a page of [`Food`]s with numbered rows.
#[must_use]
pub fn foods<F>(title: &str, list: &List<Food, F>) -> String
where
    F: Clone + PartialEq,
{
    let rows = list.items().iter().enumerate().map(|(i, food)| {
        format!(
            "{:>3}. {}  [{}]  {}",
            i + 1,
            food.name,
            food.category,
            money(food.price),
        )
    });
    page(title, list, rows)
}

/// Renders details of a single [`Food`].
#[must_use]
pub fn food(food: &Food) -> String {
    let Food {
        id,
        name,
        price,
        description,
        category,
        image_url,
    } = food;
    format!(
        "{name} ({category})\n\
         {}\n\
         {description}\n\
         image: {image_url}\n\
         id: {id}",
        money(*price),
    )
}

/// Renders the known [`menu::Category`] presets.
#[must_use]
pub fn categories() -> String {
    menu::Category::PRESETS.iter().join(", ")
}

/// Renders a page of [`Order`]s with numbered rows.
#[must_use]
pub fn orders<F>(list: &List<Order, F>) -> String
where
    F: Clone + PartialEq,
{
    let rows = list
        .items()
        .iter()
        .enumerate()
        .map(|(i, o)| format!("{:>3}. {}", i + 1, order(o)));
    page("Orders", list, rows)
}

/// Renders the [`Order`]s of a single customer.
#[must_use]
pub fn customer_orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "You have no orders yet.".to_owned();
    }
    orders.iter().map(order).join("\n")
}

/// Renders a single [`Order`] as a one-line summary.
fn order(order: &Order) -> String {
    let Order {
        id: _,
        customer,
        address,
        payment_method,
        amount,
        kind,
        date,
        line,
        status,
    } = order;
    format!(
        "{date}  {} x{}  {}  {kind}/{payment_method}  {status}  \
         {} {} <{}>, {address}",
        line.food_name,
        line.quantity,
        money(*amount),
        customer.first_name,
        customer.last_name,
        customer.email,
    )
}

/// Renders a page of the [`Feedback`] wall.
#[must_use]
pub fn feedback<F>(list: &List<Feedback, F>) -> String
where
    F: Clone + PartialEq,
{
    let rows = list.items().iter().map(|fb| {
        let stars = fb.content.rating.stars();
        format!(
            "{}{}  {}: {}",
            "*".repeat(stars.into()),
            " ".repeat((Rating::MAX - stars).into()),
            fb.content.customer_name,
            fb.content.text.excerpt(EXCERPT_LEN),
        )
    });
    page("Feedback", list, rows)
}

/// Renders the [`Cart`] contents and its total.
#[must_use]
pub fn cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_owned();
    }
    let mut out = String::new();
    for (i, item) in cart.items().iter().enumerate() {
        _ = writeln!(
            out,
            "{:>3}. {} x{}  {}",
            i + 1,
            item.product.name,
            item.quantity,
            money(item.subtotal()),
        );
    }
    _ = write!(
        out,
        "{} item(s), total {}",
        cart.count(),
        money(cart.total()),
    );
    out
}

/// Renders the outcome of a checkout.
#[must_use]
pub fn checkout(out: place_order::Output) -> String {
    let place_order::Output {
        amount,
        payment_required,
    } = out;
    if payment_required {
        format!(
            "Order placed. {} is due: pay it with `pay`.",
            money(amount),
        )
    } else {
        format!("Order placed. Pay {} on delivery.", money(amount))
    }
}

/// Renders the [`User`] details.
#[must_use]
pub fn user(user: &User) -> String {
    let User {
        id: _,
        first_name,
        last_name,
        email,
        role,
    } = user;
    format!("{first_name} {last_name} <{email}> ({role})")
}

/// Renders a titled page of `rows` along with the [`List`] position.
fn page<N, F>(
    title: &str,
    list: &List<N, F>,
    rows: impl Iterator<Item = String>,
) -> String
where
    F: Clone + PartialEq,
{
    let mut out = format!("{title}\n");
    let mut rows = rows.peekable();
    if rows.peek().is_none() {
        out.push_str("  nothing here yet\n");
    }
    for row in rows {
        out.push_str(&row);
        out.push('\n');
    }
    _ = write!(
        out,
        "page {} of {}",
        list.page(),
        list.total_pages(),
    );
    let info = list.page_info();
    let hints = [
        info.has_previous_page.then_some("`prev`"),
        info.has_next_page.then_some("`next`"),
    ];
    if hints.iter().any(Option::is_some) {
        _ = write!(out, " ({})", hints.iter().flatten().join(", "));
    }
    out
}

#[cfg(test)]
mod spec {
    use common::pagination::{Arguments, Limit, Page, PageNum, TotalPages};
    use service::{
        cart::{Cart, Product},
        command::place_order,
        domain::{Food, Quantity},
        List,
    };

    fn food(id: &str, name: &str, price: &str) -> Food {
        Food {
            id: id.parse().unwrap(),
            name: name.parse().unwrap(),
            price: price.parse().unwrap(),
            description: "Tasty".parse().unwrap(),
            category: "Rice".parse().unwrap(),
            image_url: format!("{id}.png").parse().unwrap(),
        }
    }

    fn loaded(foods: Vec<Food>, total: u32) -> List<Food, ()> {
        let mut list = List::new(Limit::new(2).unwrap(), ());
        let req = list.reload();
        let args = Arguments {
            page: PageNum::FIRST,
            limit: Limit::new(2).unwrap(),
        };
        let page = Page::new(&args, foods, TotalPages::new(total));
        _ = list.apply::<()>(req.ticket, Ok(page)).unwrap();
        list
    }

    #[test]
    fn renders_food_page_with_hints() {
        let list = loaded(
            vec![food("a", "Kottu", "850"), food("b", "Biryani", "1250")],
            2,
        );

        assert_eq!(
            super::foods("Menu", &list),
            "Menu\n\
             \x20 1. Kottu  [Rice]  Rs. 850.00\n\
             \x20 2. Biryani  [Rice]  Rs. 1250.00\n\
             page 1 of 2 (`next`)",
        );
    }

    #[test]
    fn renders_empty_page() {
        let list = loaded(vec![], 0);

        assert_eq!(
            super::foods("Menu", &list),
            "Menu\n  nothing here yet\npage 1 of 1",
        );
    }

    #[test]
    fn renders_cart_with_total() {
        let mut cart = Cart::default();
        cart.add(
            Product::from(&food("a", "Kottu", "500")),
            Quantity::new(2).unwrap(),
        );
        cart.add(Product::from(&food("b", "Tea", "150")), Quantity::ONE);

        assert_eq!(
            super::cart(&cart),
            "  1. Kottu x2  Rs. 1000.00\n\
             \x20 2. Tea x1  Rs. 150.00\n\
             3 item(s), total Rs. 1150.00",
        );
        assert_eq!(super::cart(&Cart::default()), "Your cart is empty.");
    }

    #[test]
    fn renders_checkout_outcome() {
        let due = place_order::Output {
            amount: "1150".parse().unwrap(),
            payment_required: true,
        };
        let cod = place_order::Output {
            payment_required: false,
            ..due
        };

        assert!(super::checkout(due).contains("Rs. 1150.00 is due"));
        assert!(super::checkout(cod).contains("on delivery"));
    }
}
