//! Business services
//!
//! - [`checkout`] - cart -> priced pending order (+ gateway session)
//! - [`reconcile`] - completion events -> placed order, cleared cart,
//!   committed stock

pub mod checkout;
pub mod reconcile;
