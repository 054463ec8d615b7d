//! [`Command`] definition.

pub mod checkout;
pub mod confirmation;
pub mod create_food;
pub mod delete_food;
pub mod log_in;
pub mod log_out;
pub mod make_payment;
pub mod place_order;
pub mod register_user;
pub mod submit_feedback;
pub mod update_food;
pub mod update_order_status;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    checkout::Checkout,
    confirmation::{Confirmable, Confirmed, Unconfirmed},
    create_food::CreateFood,
    delete_food::DeleteFood,
    log_in::LogIn,
    log_out::LogOut,
    make_payment::MakePayment,
    place_order::PlaceOrder,
    register_user::RegisterUser,
    submit_feedback::SubmitFeedback,
    update_food::UpdateFood,
    update_order_status::UpdateOrderStatus,
};
