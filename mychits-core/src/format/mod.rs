//! Presentation formatting shared by every screen

pub mod currency;
pub mod date;

pub use currency::{format_amount, format_amount_fixed, CurrencyFormat, RUPEE};
pub use date::{
    format_iso_date, format_locale_date, DateFormatter, LocaleDateStyle, NOT_AVAILABLE,
};
