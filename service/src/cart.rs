//! Shopping basket of a session.

use std::sync::Arc;

use common::Money;
use tokio::sync::watch;
use tracing as log;

use crate::domain::{menu, Food, Quantity};

/// Food selected into a [`Cart`], as it was shown when added.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Product {
    /// [`menu::Id`] of the food.
    pub id: menu::Id,

    /// [`menu::Name`] of the food.
    pub name: menu::Name,

    /// [`menu::ImageUrl`] of the food picture.
    pub image_url: menu::ImageUrl,

    /// Unit price of the food.
    pub price: Money,
}

impl From<Food> for Product {
    fn from(food: Food) -> Self {
        Self {
            id: food.id,
            name: food.name,
            image_url: food.image_url,
            price: food.price,
        }
    }
}

impl From<&Food> for Product {
    fn from(food: &Food) -> Self {
        food.clone().into()
    }
}

/// Line of a [`Cart`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Item {
    /// Selected [`Product`].
    pub product: Product,

    /// Selected [`Quantity`] of the [`Product`].
    pub quantity: Quantity,
}

impl Item {
    /// Returns the amount of this [`Item`].
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.product.price * self.quantity.get()
    }
}

/// Ordered collection of [`Item`]s, at most one per [`menu::Id`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Cart {
    /// [`Item`]s in the order they were first added.
    items: Vec<Item>,
}

impl Cart {
    /// Adds the given [`Quantity`] of the [`Product`] to this [`Cart`].
    ///
    /// If the [`Product`] is in the [`Cart`] already, its [`Quantity`] is
    /// increased instead.
    pub fn add(&mut self, product: impl Into<Product>, quantity: Quantity) {
        let product = product.into();
        if let Some(item) = self.find_mut(&product.id) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(Item { product, quantity });
        }
    }

    /// Removes the [`Item`] with the given [`menu::Id`], if any.
    pub fn remove(&mut self, id: &menu::Id) -> Option<Item> {
        let at = self.items.iter().position(|i| &i.product.id == id)?;
        Some(self.items.remove(at))
    }

    /// Sets the [`Quantity`] of the [`Item`] with the given [`menu::Id`].
    ///
    /// Returns `false` if there is no such [`Item`].
    pub fn set_quantity(&mut self, id: &menu::Id, quantity: Quantity) -> bool {
        self.find_mut(id).map(|i| i.quantity = quantity).is_some()
    }

    /// Removes all the [`Item`]s.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the [`Item`]s of this [`Cart`].
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the [`Item`] with the given [`menu::Id`], if any.
    #[must_use]
    pub fn get(&self, id: &menu::Id) -> Option<&Item> {
        self.items.iter().find(|i| &i.product.id == id)
    }

    /// Returns the number of distinct [`Item`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Indicates whether this [`Cart`] has no [`Item`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of units across all [`Item`]s.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity.get())).sum()
    }

    /// Returns the total amount of this [`Cart`].
    #[must_use]
    pub fn total(&self) -> Money {
        self.items.iter().map(Item::subtotal).sum()
    }

    fn find_mut(&mut self, id: &menu::Id) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| &i.product.id == id)
    }
}

/// Shared [`Cart`] of a session, notifying its subscribers on changes.
#[derive(Clone, Debug)]
pub struct Store {
    /// Sending half of the [`Cart`] channel, holding the current [`Cart`].
    sender: Arc<watch::Sender<Cart>>,
}

impl Store {
    /// Creates a new [`Store`] with an empty [`Cart`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            sender: Arc::new(watch::Sender::new(Cart::default())),
        }
    }

    /// Subscribes to [`Cart`] changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.sender.subscribe()
    }

    /// Returns a snapshot of the current [`Cart`].
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.sender.borrow().clone()
    }

    /// Returns the total amount of the current [`Cart`].
    #[must_use]
    pub fn total(&self) -> Money {
        self.sender.borrow().total()
    }

    /// Returns the number of distinct [`Item`]s in the current [`Cart`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.sender.borrow().len()
    }

    /// Indicates whether the current [`Cart`] is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sender.borrow().is_empty()
    }

    /// Adds the [`Product`] to the [`Cart`].
    ///
    /// See [`Cart::add()`] for details.
    pub fn add(&self, product: impl Into<Product>, quantity: Quantity) {
        let product = product.into();
        log::debug!("adding {quantity} x `{}` to cart", product.id);
        self.sender.send_modify(|cart| cart.add(product, quantity));
    }

    /// Removes the [`Item`] with the given [`menu::Id`] from the [`Cart`].
    ///
    /// Subscribers are not notified if there is no such [`Item`].
    pub fn remove(&self, id: &menu::Id) -> Option<Item> {
        let mut removed = None;
        _ = self.sender.send_if_modified(|cart| {
            removed = cart.remove(id);
            removed.is_some()
        });
        removed
    }

    /// Sets the [`Quantity`] of the [`Item`] with the given [`menu::Id`].
    ///
    /// Returns `false` if there is no such [`Item`].
    pub fn set_quantity(&self, id: &menu::Id, quantity: Quantity) -> bool {
        self.sender
            .send_if_modified(|cart| cart.set_quantity(id, quantity))
    }

    /// Removes all the [`Item`]s from the [`Cart`].
    pub fn clear(&self) {
        self.sender.send_modify(Cart::clear);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
