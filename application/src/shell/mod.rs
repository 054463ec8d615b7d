//! Interactive [`Shell`] driving a [`Context`].

mod line;

use std::path::PathBuf;

use clap::Parser as _;
use derive_more::Debug;
use rustyline::{error::ReadlineError, DefaultEditor};
use service::{cart::Cart, command::RegisterUser, domain::payment};
use tokio::sync::watch;
use tracing as log;

use crate::{
    config,
    context::{Author, Turn},
    view, Context, Error,
};

pub use self::line::{split, FilterArgs, FoodFields, Line};

/// Outcome of executing a single [`Line`].
#[derive(Debug)]
enum Flow {
    /// Show the text and keep reading.
    Continue(String),

    /// Leave the [`Shell`].
    Exit,
}

/// Read-eval-print loop over a [`Context`].
#[derive(Debug)]
pub struct Shell {
    /// Line editor reading the input.
    #[debug(skip)]
    editor: DefaultEditor,

    /// File the history is persisted to, if any.
    history: Option<PathBuf>,

    /// [`Context`] the [`Line`]s are executed in.
    context: Context,

    /// Watcher of the cart shown in the prompt.
    cart: watch::Receiver<Cart>,
}

impl Shell {
    /// Creates a new [`Shell`] over the provided [`Context`].
    ///
    /// # Errors
    ///
    /// If the terminal can't be set up for line editing.
    pub fn new(
        context: Context,
        conf: config::Shell,
    ) -> Result<Self, ReadlineError> {
        let mut editor = DefaultEditor::new()?;
        if let Some(path) = &conf.history {
            if let Err(e) = editor.load_history(path) {
                log::debug!(
                    "no history loaded from `{}`: {e}",
                    path.display(),
                );
            }
        }
        Ok(Self {
            editor,
            history: conf.history,
            cart: context.cart().subscribe(),
            context,
        })
    }

    /// Reads and executes [`Line`]s until the user leaves.
    ///
    /// # Errors
    ///
    /// If the terminal fails.
    pub async fn run(mut self) -> Result<(), ReadlineError> {
        println!("Welcome to Golden Spoon! Type `help` to see the commands.");
        loop {
            let prompt = self.prompt();
            let input = match self.editor.readline(&prompt) {
                Ok(input) => input,
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e),
            };
            if input.trim().is_empty() {
                continue;
            }
            _ = self.editor.add_history_entry(input.as_str())?;

            match self.eval(&input).await {
                Ok(Flow::Continue(out)) => println!("{out}"),
                Ok(Flow::Exit) => break,
                Err(e) => {
                    log::debug!("`{}` failed: {e}", command_name(&input));
                    eprintln!("{}", e.concise());
                }
            }
        }

        if let Some(path) = &self.history {
            if let Err(e) = self.editor.save_history(path) {
                log::warn!(
                    "failed to save history to `{}`: {e}",
                    path.display(),
                );
            }
        }
        println!("Bye!");
        Ok(())
    }

    /// Returns the prompt reflecting the current user and cart.
    fn prompt(&mut self) -> String {
        let items = self.cart.borrow_and_update().len();
        let who = self
            .context
            .current_user()
            .map(|u| format!(" {}", u.first_name))
            .unwrap_or_default();
        if items == 0 {
            format!("golden-spoon{who}> ")
        } else {
            format!("golden-spoon{who} [cart: {items}]> ")
        }
    }

    /// Parses and executes the `input` line.
    async fn eval(&mut self, input: &str) -> Result<Flow, Error> {
        let words = split(input)?;
        let line = match Line::try_parse_from(words) {
            Ok(line) => line,
            Err(e) => {
                // Help and version requests are reported as errors too.
                return if e.use_stderr() {
                    Err(Error::invalid_input(&e.render()))
                } else {
                    Ok(Flow::Continue(e.render().to_string()))
                };
            }
        };
        self.execute(line).await
    }

    /// Executes the parsed [`Line`].
    #[tracing::instrument(skip_all)]
    async fn execute(&mut self, line: Line) -> Result<Flow, Error> {
        let ctx = &mut self.context;
        let out = match line {
            Line::Login { email, password } => {
                ctx.log_in(email, password).await
            }
            Line::Logout => ctx.log_out().await,
            Line::Register {
                first_name,
                last_name,
                email,
                password,
                confirm,
                role,
            } => {
                ctx.register(RegisterUser {
                    first_name,
                    last_name,
                    email,
                    password,
                    password_confirmation: confirm,
                    role,
                })
                .await
            }
            Line::Me => ctx.me().await,
            Line::Menu { filter, page } => {
                ctx.show_menu(filter.into_filter(), page).await
            }
            Line::Categories => Ok(view::categories()),
            Line::Show { n } => ctx.show_food(n),
            Line::Next => ctx.turn(Turn::Next).await,
            Line::Prev => ctx.turn(Turn::Previous).await,
            Line::Add { n, quantity } => ctx.add_to_cart(n, quantity),
            Line::Remove { n } => ctx.remove_from_cart(n),
            Line::Qty { n, quantity } => ctx.set_quantity(n, quantity),
            Line::Cart => Ok(ctx.show_cart()),
            Line::Clear => Ok(ctx.clear_cart()),
            Line::Checkout {
                address,
                kind,
                payment,
            } => ctx.checkout(address, kind, payment).await,
            Line::Pay {
                phone,
                holder,
                number,
                expiry,
                cvv,
            } => {
                let card = payment::Card {
                    holder,
                    number,
                    expiry,
                    cvv,
                };
                ctx.pay(phone, card).await
            }
            Line::MyOrders => ctx.my_orders().await,
            Line::Review {
                rating,
                text,
                name,
                email,
            } => {
                ctx.submit_feedback(Author { name, email }, rating, text)
                    .await
            }
            Line::Feedback { page } => ctx.show_feedback(page).await,
            Line::Foods { filter, page } => {
                ctx.show_foods(filter.into_filter(), page).await
            }
            Line::NewFood { fields } => ctx.create_food(fields.into()).await,
            Line::EditFood { n, fields } => {
                ctx.update_food(n, fields.into()).await
            }
            Line::DeleteFood { n } => ctx.delete_food(n),
            Line::Yes => ctx.confirm(true).await,
            Line::No => ctx.confirm(false).await,
            Line::Orders { page } => ctx.show_orders(page).await,
            Line::Status { n, status } => {
                ctx.update_order_status(n, status).await
            }
            Line::Report { path } => ctx.download_report(&path).await,
            Line::Exit => return Ok(Flow::Exit),
        };
        out.map(Flow::Continue)
    }
}

/// Returns the first word of the `input`, which names the command.
fn command_name(input: &str) -> &str {
    input.split_whitespace().next().unwrap_or_default()
}
