//! [`Context`]-related definitions.

use std::path::{Path, PathBuf};

use common::{
    operations::By,
    pagination::{Page, PageNum, Selector},
    Money,
};
use secrecy::{ExposeSecret as _, SecretBox};
use service::{
    cart,
    command::{
        self, checkout, place_order, Command as _, Unconfirmed,
    },
    domain::{
        feedback, menu, order, payment, user, Feedback, Food, Order,
        Quantity, User,
    },
    infra::backend,
    list::{self, Applied},
    query::{self, BackendQuery, Query},
    read::menu::list::Filter,
    List,
};
use tracerr::Traced;
use tracing as log;

use crate::{define_error, view, AsError, Error, Service};

define_error! {
    enum AccessError {
        #[code = "AUTHORIZATION_REQUIRED"]
        #[message = "Please log in first"]
        AuthorizationRequired,

        #[code = "ADMIN_REQUIRED"]
        #[message = "Only administrators can do that"]
        AdminRequired,

        #[code = "NO_SUCH_ITEM"]
        #[message = "There is no such item on the shown page"]
        NoSuchItem,

        #[code = "NOTHING_TO_CONFIRM"]
        #[message = "There is nothing to confirm"]
        NothingToConfirm,
    }
}

/// Paginated view the page navigation applies to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Focus {
    /// Customer-facing menu.
    #[default]
    Menu,

    /// Admin food grid.
    Foods,

    /// Order registry.
    Orders,

    /// Feedback wall.
    Feedback,
}

/// Direction of a page turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Turn {
    /// Towards the last page.
    Next,

    /// Towards the first page.
    Previous,
}

/// Picture given for a [`Food`] being created or edited.
#[derive(Clone, Debug)]
pub enum ImageSource {
    /// Local file to upload.
    File(PathBuf),

    /// Picture already stored by the backend.
    Url(menu::ImageUrl),
}

/// Changes of a [`Food`], unset fields being left as they are.
#[derive(Clone, Debug, Default)]
pub struct FoodChanges {
    /// New [`menu::Name`].
    pub name: Option<menu::Name>,

    /// New price.
    pub price: Option<Money>,

    /// New [`menu::Description`].
    pub description: Option<menu::Description>,

    /// New [`menu::Category`].
    pub category: Option<menu::Category>,

    /// New picture.
    pub image: Option<ImageSource>,
}

/// Author of a [`Feedback`], defaulting to the logged in [`User`].
#[derive(Clone, Debug, Default)]
pub struct Author {
    /// Name to sign the [`Feedback`] with.
    pub name: Option<feedback::CustomerName>,

    /// Contact [`user::Email`].
    pub email: Option<user::Email>,
}

/// State of a single shell session.
///
/// Every operation returns the text to show to the user.
#[derive(Debug)]
pub struct Context {
    /// [`Service`] instance.
    service: Service,

    /// Shopping [`cart::Store`].
    cart: cart::Store,

    /// Customer-facing menu.
    menu: List<Food, Filter>,

    /// Admin food grid.
    foods: List<Food, Filter>,

    /// Order registry.
    orders: List<Order, ()>,

    /// Feedback wall.
    feedback: List<Feedback, ()>,

    /// Paginated view the page navigation applies to.
    focus: Focus,

    /// Logged in [`User`], if any.
    user: Option<User>,

    /// Deletion awaiting a confirmation, if any.
    pending: Option<Unconfirmed<command::DeleteFood>>,

    /// Amount of the placed orders to be paid by card.
    due: Money,
}

impl Context {
    /// Creates a new [`Context`] around the provided [`Service`].
    #[must_use]
    pub fn new(service: Service) -> Self {
        let sizes = service.config().page_sizes;
        Self {
            cart: cart::Store::new(),
            menu: List::new(sizes.menu, Filter::All),
            foods: List::new(sizes.foods, Filter::All),
            orders: List::new(sizes.orders, ()),
            feedback: List::new(sizes.feedback, ()),
            focus: Focus::default(),
            user: None,
            pending: None,
            due: Money::ZERO,
            service,
        }
    }

    /// Returns the shopping [`cart::Store`] of this [`Context`].
    #[must_use]
    pub const fn cart(&self) -> &cart::Store {
        &self.cart
    }

    /// Returns the logged in [`User`], if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Logs the [`User`] with the provided credentials in.
    ///
    /// # Errors
    ///
    /// If the credentials are wrong or the backend fails.
    pub async fn log_in(
        &mut self,
        email: user::Email,
        password: SecretBox<user::Password>,
    ) -> Result<String, Error> {
        let user = self
            .service
            .execute(command::LogIn { email, password })
            .await
            .map_err(AsError::into_error)?;
        log::info!("logged in as `{}`", user.email);

        let greeting = format!("Welcome, {}!", user.first_name);
        self.user = Some(user);
        Ok(greeting)
    }

    /// Logs the current [`User`] out.
    ///
    /// # Errors
    ///
    /// If nobody is logged in.
    pub async fn log_out(&mut self) -> Result<String, Error> {
        _ = self.user()?;
        self.service
            .execute(command::LogOut)
            .await
            .map_err(AsError::into_error)?;
        self.user = None;
        self.pending = None;
        self.due = Money::ZERO;
        Ok("Logged out.".to_owned())
    }

    /// Registers a new [`User`].
    ///
    /// # Errors
    ///
    /// If the passwords differ or the backend rejects the registration.
    pub async fn register(
        &self,
        cmd: command::RegisterUser,
    ) -> Result<String, Error> {
        self.service
            .execute(cmd)
            .await
            .map_err(AsError::into_error)?;
        Ok("Registered. You can `login` now.".to_owned())
    }

    /// Refreshes and shows the logged in [`User`].
    ///
    /// # Errors
    ///
    /// If nobody is logged in or the backend fails.
    pub async fn me(&mut self) -> Result<String, Error> {
        _ = self.user()?;
        let user = self
            .service
            .execute(query::user::Me::by(user::session::Current))
            .await
            .map_err(AsError::into_error)?;
        let out = view::user(&user);
        self.user = Some(user);
        Ok(out)
    }

    /// Shows the menu, narrowed by the `filter` or turned to the `page` if
    /// any is given.
    ///
    /// # Errors
    ///
    /// If the `page` doesn't exist or the backend fails.
    pub async fn show_menu(
        &mut self,
        filter: Option<Filter>,
        page: Option<u32>,
    ) -> Result<String, Error> {
        self.focus = Focus::Menu;
        let req = request(&mut self.menu, filter, page)?;
        load(&self.service, &mut self.menu, req).await?;
        Ok(view::foods("Menu", &self.menu))
    }

    /// Shows details of the `n`th [`Food`] on the menu page.
    ///
    /// # Errors
    ///
    /// If there is no such [`Food`].
    pub fn show_food(&self, n: usize) -> Result<String, Error> {
        nth(&self.menu, n).map(view::food)
    }

    /// Shows the admin food grid, narrowed by the `filter` or turned to the
    /// `page` if any is given.
    ///
    /// # Errors
    ///
    /// If not an admin, the `page` doesn't exist or the backend fails.
    pub async fn show_foods(
        &mut self,
        filter: Option<Filter>,
        page: Option<u32>,
    ) -> Result<String, Error> {
        _ = self.admin()?;
        self.focus = Focus::Foods;
        let req = request(&mut self.foods, filter, page)?;
        load(&self.service, &mut self.foods, req).await?;
        Ok(view::foods("Foods", &self.foods))
    }

    /// Shows the order registry, turned to the `page` if given.
    ///
    /// # Errors
    ///
    /// If not an admin, the `page` doesn't exist or the backend fails.
    pub async fn show_orders(
        &mut self,
        page: Option<u32>,
    ) -> Result<String, Error> {
        _ = self.admin()?;
        self.focus = Focus::Orders;
        let req = request(&mut self.orders, None, page)?;
        load(&self.service, &mut self.orders, req).await?;
        Ok(view::orders(&self.orders))
    }

    /// Shows the feedback wall, turned to the `page` if given.
    ///
    /// # Errors
    ///
    /// If the `page` doesn't exist or the backend fails.
    pub async fn show_feedback(
        &mut self,
        page: Option<u32>,
    ) -> Result<String, Error> {
        self.focus = Focus::Feedback;
        let req = request(&mut self.feedback, None, page)?;
        load(&self.service, &mut self.feedback, req).await?;
        Ok(view::feedback(&self.feedback))
    }

    /// Turns the page of the focused view.
    ///
    /// # Errors
    ///
    /// If there is no page in that direction or the backend fails.
    pub async fn turn(&mut self, turn: Turn) -> Result<String, Error> {
        let target = |page: PageNum| match turn {
            Turn::Next => Some(page.next().get()),
            Turn::Previous => Some(page.previous().map_or(0, PageNum::get)),
        };
        match self.focus {
            Focus::Menu => {
                let page = target(self.menu.page());
                self.show_menu(None, page).await
            }
            Focus::Foods => {
                let page = target(self.foods.page());
                self.show_foods(None, page).await
            }
            Focus::Orders => {
                let page = target(self.orders.page());
                self.show_orders(page).await
            }
            Focus::Feedback => {
                let page = target(self.feedback.page());
                self.show_feedback(page).await
            }
        }
    }

    /// Shows the [`Order`]s of the logged in [`User`].
    ///
    /// # Errors
    ///
    /// If nobody is logged in or the backend fails.
    pub async fn my_orders(&self) -> Result<String, Error> {
        let email = self.user()?.email.clone();
        let orders = self
            .service
            .execute(query::order::ByEmail::by(email))
            .await
            .map_err(AsError::into_error)?;
        Ok(view::customer_orders(&orders))
    }

    /// Adds `quantity` of the `n`th [`Food`] on the menu page to the cart.
    ///
    /// # Errors
    ///
    /// If there is no such [`Food`].
    pub fn add_to_cart(
        &self,
        n: usize,
        quantity: Quantity,
    ) -> Result<String, Error> {
        let food = nth(&self.menu, n)?;
        self.cart.add(food, quantity);
        Ok(format!(
            "Added {quantity} x {} to your cart ({} total).",
            food.name,
            view::money(self.cart.total()),
        ))
    }

    /// Removes the `n`th cart item.
    ///
    /// # Errors
    ///
    /// If there is no such item.
    pub fn remove_from_cart(&self, n: usize) -> Result<String, Error> {
        let id = self.cart_item(n)?;
        _ = self.cart.remove(&id);
        Ok(view::cart(&self.cart.snapshot()))
    }

    /// Sets the quantity of the `n`th cart item, clamping it to at least 1.
    ///
    /// # Errors
    ///
    /// If there is no such item.
    pub fn set_quantity(&self, n: usize, count: i64) -> Result<String, Error> {
        let id = self.cart_item(n)?;
        let quantity = Quantity::clamped(count);
        _ = self.cart.set_quantity(&id, quantity);
        Ok(view::cart(&self.cart.snapshot()))
    }

    /// Shows the cart.
    #[must_use]
    pub fn show_cart(&self) -> String {
        view::cart(&self.cart.snapshot())
    }

    /// Empties the cart.
    #[must_use]
    pub fn clear_cart(&self) -> String {
        self.cart.clear();
        "Your cart is empty now.".to_owned()
    }

    /// Orders everything in the cart on behalf of the logged in [`User`].
    ///
    /// The cart is emptied once all the [`Order`]s are placed.
    ///
    /// # Errors
    ///
    /// If nobody is logged in, the cart is empty, the `payment_method` isn't
    /// allowed for the `kind` or the backend fails.
    pub async fn checkout(
        &mut self,
        address: order::Address,
        kind: order::Kind,
        payment_method: Option<order::PaymentMethod>,
    ) -> Result<String, Error> {
        let user = self.user()?;
        let cmd = command::Checkout {
            cart: self.cart.snapshot(),
            customer: order::Customer {
                email: user.email.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
            },
            address,
            payment_method: payment_method
                .unwrap_or_else(|| kind.default_payment_method()),
            kind,
        };
        let out = match self.service.execute(cmd).await {
            Ok(out) => out,
            Err(e) => {
                let placed = settle_partial(&self.cart, e.as_ref());
                let mut err = e.into_error();
                if let Some((count, done)) = placed {
                    self.credit(done);
                    err.message = format!(
                        "{} ({count} order(s) placed before that were taken \
                         out of your cart)",
                        err.message,
                    );
                }
                return Err(err);
            }
        };

        self.cart.clear();
        self.credit(out);
        Ok(view::checkout(out))
    }

    /// Pays the amount due by card.
    ///
    /// # Errors
    ///
    /// If nobody is logged in, nothing is due or the backend fails.
    pub async fn pay(
        &mut self,
        phone: payment::Phone,
        card: payment::Card,
    ) -> Result<String, Error> {
        let email = self.user()?.email.clone();
        let number = card.number.clone();
        self.service
            .execute(command::MakePayment {
                email,
                phone,
                card,
                amount: self.due,
            })
            .await
            .map_err(AsError::into_error)?;

        let paid = view::money(self.due);
        self.due = Money::ZERO;
        Ok(format!(
            "Paid {paid} with the card ending in {}.",
            number.expose_secret().last_four(),
        ))
    }

    /// Creates a new menu [`Food`].
    ///
    /// # Errors
    ///
    /// If not an admin, some field is missing, the picture can't be read or
    /// the backend fails.
    pub async fn create_food(
        &mut self,
        food: FoodChanges,
    ) -> Result<String, Error> {
        define_error! {
            enum Error {
                #[code = "MISSING_FIELD"]
                #[message = "Name, price, description, category and picture \
                             are all required"]
                MissingField,
            }
        }

        _ = self.admin()?;
        let FoodChanges {
            name: Some(name),
            price: Some(price),
            description: Some(description),
            category: Some(category),
            image: Some(image),
        } = food
        else {
            return Err(Error::MissingField.into());
        };
        let image = upload(image).await?;

        self.service
            .execute(command::CreateFood {
                name,
                price,
                description,
                category,
                image,
            })
            .await
            .map_err(AsError::into_error)?;
        self.refreshed_foods("Food created.").await
    }

    /// Applies the `changes` to the `n`th [`Food`] of the admin grid.
    ///
    /// # Errors
    ///
    /// If not an admin, there is no such [`Food`], the picture can't be read
    /// or the backend fails.
    pub async fn update_food(
        &mut self,
        n: usize,
        changes: FoodChanges,
    ) -> Result<String, Error> {
        _ = self.admin()?;
        let food = nth(&self.foods, n)?.clone();
        let image = match changes.image {
            Some(image) => upload(image).await?,
            None => menu::Image::Existing(food.image_url),
        };

        self.service
            .execute(command::UpdateFood {
                id: food.id,
                name: changes.name.unwrap_or(food.name),
                price: changes.price.unwrap_or(food.price),
                description: changes.description.unwrap_or(food.description),
                category: changes.category.unwrap_or(food.category),
                image,
            })
            .await
            .map_err(AsError::into_error)?;
        self.refreshed_foods("Food updated.").await
    }

    /// Asks for a confirmation of deleting the `n`th [`Food`] of the admin
    /// grid.
    ///
    /// # Errors
    ///
    /// If not an admin or there is no such [`Food`].
    pub fn delete_food(&mut self, n: usize) -> Result<String, Error> {
        _ = self.admin()?;
        let food = nth(&self.foods, n)?;
        let cmd = Unconfirmed::new(command::DeleteFood::from(food));
        let prompt = format!("{} Type `yes` or `no`.", cmd.prompt());
        self.pending = Some(cmd);
        Ok(prompt)
    }

    /// Answers the pending confirmation.
    ///
    /// # Errors
    ///
    /// If nothing awaits a confirmation or the backend fails.
    pub async fn confirm(&mut self, yes: bool) -> Result<String, Error> {
        let cmd = self
            .pending
            .take()
            .ok_or_else(|| Error::from(AccessError::NothingToConfirm))?;
        if !yes {
            let cmd = cmd.cancel();
            return Ok(format!("Kept `{}`.", cmd.name));
        }

        self.service
            .execute(cmd.confirm())
            .await
            .map_err(AsError::into_error)?;
        self.refreshed_foods("Food deleted.").await
    }

    /// Sets the [`order::Status`] of the `n`th [`Order`] in the registry.
    ///
    /// # Errors
    ///
    /// If not an admin, there is no such [`Order`] or the backend fails.
    pub async fn update_order_status(
        &mut self,
        n: usize,
        status: order::Status,
    ) -> Result<String, Error> {
        _ = self.admin()?;
        let id = nth(&self.orders, n)?.id.clone();
        self.service
            .execute(command::UpdateOrderStatus { id, status })
            .await
            .map_err(AsError::into_error)?;

        let req = self.orders.reload();
        load(&self.service, &mut self.orders, req).await?;
        Ok(format!("Order marked {status}.\n{}", view::orders(&self.orders)))
    }

    /// Leaves a [`Feedback`] on the wall.
    ///
    /// # Errors
    ///
    /// If the `author` can't be determined or the backend fails.
    pub async fn submit_feedback(
        &self,
        author: Author,
        rating: feedback::Rating,
        text: feedback::Text,
    ) -> Result<String, Error> {
        let name = author.name.or_else(|| {
            self.user.as_ref().and_then(|u| {
                format!("{} {}", u.first_name, u.last_name).parse().ok()
            })
        });
        let email = author
            .email
            .or_else(|| self.user.as_ref().map(|u| u.email.clone()));
        let (Some(customer_name), Some(email)) = (name, email) else {
            return Err(Error::invalid_input(
                &"Log in or provide both `--name` and `--email`",
            ));
        };

        self.service
            .execute(command::SubmitFeedback {
                customer_name,
                email,
                rating,
                text,
            })
            .await
            .map_err(AsError::into_error)?;
        Ok("Thank you for your feedback!".to_owned())
    }

    /// Downloads the PDF report over all the [`Order`]s into the `path`.
    ///
    /// # Errors
    ///
    /// If not an admin, the backend fails or the file can't be written.
    pub async fn download_report(
        &self,
        path: &Path,
    ) -> Result<String, Error> {
        _ = self.admin()?;
        let report = self
            .service
            .execute(query::order::Report::by(()))
            .await
            .map_err(AsError::into_error)?;
        let bytes: Vec<u8> = report.into();
        tokio::fs::write(path, &bytes).await.map_err(|e| Error {
            code: "IO_ERROR",
            message: format!("Failed to write `{}`: {e}", path.display()),
            backtrace: None,
        })?;
        Ok(format!(
            "Saved the report ({} bytes) to `{}`.",
            bytes.len(),
            path.display(),
        ))
    }

    /// Adds the amount of the placed [`Order`]s to the due one, if they are
    /// to be paid by card.
    fn credit(&mut self, placed: place_order::Output) {
        if placed.payment_required {
            self.due = self.due + placed.amount;
        }
    }

    /// Returns the logged in [`User`].
    fn user(&self) -> Result<&User, Error> {
        self.user
            .as_ref()
            .ok_or_else(|| AccessError::AuthorizationRequired.into())
    }

    /// Returns the logged in [`User`] if it's an admin.
    fn admin(&self) -> Result<&User, Error> {
        let user = self.user()?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(AccessError::AdminRequired.into())
        }
    }

    /// Returns the [`menu::Id`] of the `n`th cart item.
    fn cart_item(&self, n: usize) -> Result<menu::Id, Error> {
        n.checked_sub(1)
            .and_then(|i| self.cart.snapshot().items().get(i).cloned())
            .map(|item| item.product.id)
            .ok_or_else(|| AccessError::NoSuchItem.into())
    }

    /// Reloads the admin food grid, showing it after the `notice`.
    async fn refreshed_foods(&mut self, notice: &str) -> Result<String, Error> {
        self.focus = Focus::Foods;
        let req = self.foods.reload();
        load(&self.service, &mut self.foods, req).await?;
        Ok(format!("{notice}\n{}", view::foods("Foods", &self.foods)))
    }
}

/// Issues a [`list::Request`] narrowing the [`List`] by the `filter`, or
/// turning it to the `page`, or reloading it otherwise.
fn request<N, F>(
    list: &mut List<N, F>,
    filter: Option<F>,
    page: Option<u32>,
) -> Result<list::Request<F>, Error>
where
    F: Clone + PartialEq,
{
    match (filter, page) {
        (Some(filter), _) => Ok(list.set_filter(filter)),
        (None, Some(page)) => list.set_page(page).map_err(AsError::into_error),
        (None, None) => Ok(list.reload()),
    }
}

/// Executes the [`list::Request`] and applies its response to the [`List`].
async fn load<N, F>(
    service: &Service,
    list: &mut List<N, F>,
    request: list::Request<F>,
) -> Result<(), Error>
where
    F: Clone + PartialEq,
    Service: Query<
        BackendQuery<By<Page<N>, Selector<F>>>,
        Ok = Page<N>,
        Err = Traced<backend::Error>,
    >,
{
    let ticket = request.ticket;
    let applied = service
        .load_list(list, request)
        .await
        .map_err(AsError::into_error)?;
    if applied == Applied::Stale {
        log::debug!("response to request {ticket} came too late");
    }
    Ok(())
}

/// Removes the items ordered before a failed checkout from the `cart`.
///
/// Returns the number of those items along with the summary of their
/// [`Order`]s, if any has been placed.
fn settle_partial(
    cart: &cart::Store,
    err: &checkout::ExecutionError,
) -> Option<(usize, place_order::Output)> {
    let checkout::ExecutionError::PlaceOrder { placed, done, .. } = err
    else {
        return None;
    };
    if placed.is_empty() {
        return None;
    }
    for id in placed {
        _ = cart.remove(id);
    }
    Some((placed.len(), *done))
}

/// Returns the `n`th (1-indexed) item of the displayed [`List`] page.
fn nth<N, F>(list: &List<N, F>, n: usize) -> Result<&N, Error>
where
    F: Clone + PartialEq,
{
    n.checked_sub(1)
        .and_then(|i| list.items().get(i))
        .ok_or_else(|| AccessError::NoSuchItem.into())
}

/// Turns the [`ImageSource`] into a [`menu::Image`], reading the file if
/// any.
async fn upload(image: ImageSource) -> Result<menu::Image, Error> {
    match image {
        ImageSource::Url(url) => Ok(menu::Image::Existing(url)),
        ImageSource::File(path) => {
            let bytes = tokio::fs::read(&path).await.map_err(|e| Error {
                code: "IO_ERROR",
                message: format!("Failed to read `{}`: {e}", path.display()),
                backtrace: None,
            })?;
            let file_name = path.file_name().map_or_else(
                || "image".to_owned(),
                |n| n.to_string_lossy().into_owned(),
            );
            Ok(menu::Image::Upload(menu::Upload { file_name, bytes }))
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{
        pagination::{Limit, TotalPages},
        Money,
    };
    use service::{
        cart::{self, Product},
        command::{checkout, place_order},
        domain::{
            order::{Kind, PaymentMethod},
            Quantity,
        },
        list::OutOfRange,
        List,
    };

    use super::{nth, request, settle_partial};

    fn product(id: &str) -> Product {
        Product {
            id: id.parse().unwrap(),
            name: format!("Food {id}").parse().unwrap(),
            image_url: format!("{id}.png").parse().unwrap(),
            price: "500".parse().unwrap(),
        }
    }

    fn failed_after(placed: &[&str]) -> checkout::ExecutionError {
        checkout::ExecutionError::PlaceOrder {
            placed: placed.iter().map(|id| id.parse().unwrap()).collect(),
            done: place_order::Output {
                amount: "500".parse().unwrap(),
                payment_required: true,
            },
            source: place_order::ExecutionError::PaymentMethodNotAllowed {
                kind: Kind::TakeAway,
                payment_method: PaymentMethod::CashOnDelivery,
            },
        }
    }

    #[test]
    fn takes_placed_items_out_of_cart() {
        let store = cart::Store::new();
        store.add(product("a"), Quantity::ONE);
        store.add(product("b"), Quantity::ONE);

        let (count, done) =
            settle_partial(&store, &failed_after(&["a"])).unwrap();

        assert_eq!(count, 1);
        assert_eq!(done.amount, "500".parse::<Money>().unwrap());
        let left = store.snapshot();
        assert_eq!(left.len(), 1);
        assert_eq!(left.items()[0].product, product("b"));
    }

    #[test]
    fn keeps_cart_when_nothing_placed() {
        let store = cart::Store::new();
        store.add(product("a"), Quantity::ONE);

        assert!(settle_partial(&store, &failed_after(&[])).is_none());
        assert!(settle_partial(&store, &checkout::ExecutionError::EmptyCart)
            .is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn picks_items_by_position() {
        let mut list = List::<u8, ()>::new(Limit::new(3).unwrap(), ());
        let req = list.reload();
        let page = common::pagination::Page::new(
            &req.selector.arguments,
            [7_u8, 8, 9],
            TotalPages::ONE,
        );
        _ = list.apply::<()>(req.ticket, Ok(page)).unwrap();

        assert_eq!(nth(&list, 1).ok(), Some(&7));
        assert_eq!(nth(&list, 3).ok(), Some(&9));
        assert_eq!(nth(&list, 0).unwrap_err().code, "NO_SUCH_ITEM");
        assert_eq!(nth(&list, 4).unwrap_err().code, "NO_SUCH_ITEM");
    }

    #[test]
    fn filter_takes_precedence_over_page() {
        let mut list =
            List::<u8, Option<u8>>::new(Limit::new(3).unwrap(), None);

        let req = request(&mut list, Some(Some(2)), Some(5)).unwrap();
        assert_eq!(req.selector.filter, Some(2));
        assert_eq!(req.selector.arguments.page.get(), 1);

        let req = request(&mut list, None, None).unwrap();
        assert_eq!(req.selector.filter, Some(2));
    }

    #[test]
    fn rejects_unknown_page() {
        let mut list = List::<u8, ()>::new(Limit::new(3).unwrap(), ());

        let err = request(&mut list, None, Some(2)).unwrap_err();

        assert_eq!(err.code, "PAGE_OUT_OF_RANGE");
        assert_eq!(
            err.message,
            OutOfRange {
                requested: 2,
                total_pages: TotalPages::ONE,
            }
            .to_string(),
        );
    }
}
