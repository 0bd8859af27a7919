pub mod x_rates;

pub use x_rates::XRatesProvider;
