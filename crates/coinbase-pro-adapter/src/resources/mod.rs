/*
[INPUT]:  Any Transport implementation
[OUTPUT]: Resource facades with one method per REST endpoint
[POS]:    Resource layer - typed wrappers over the transport
[UPDATE]: When adding resource groups or changing response decoding
*/

//! Resource facades.
//!
//! Every facade borrows a [`Transport`] and turns raw responses into decoded
//! JSON. Unlike the transport, facades treat any response that
//! [`Subscriber::error`] flags (by default, anything but 200) as an error and
//! surface it as [`CoinbaseError::Api`].

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::{CoinbaseError, RawResponse, Result, Transport};

macro_rules! facade {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name<'a, T: ?Sized> {
            transport: &'a T,
        }

        impl<'a, T: $crate::http::Transport + ?Sized> $name<'a, T> {
            pub fn new(transport: &'a T) -> Self {
                Self { transport }
            }
        }

        impl<T: $crate::http::Transport + ?Sized> $crate::resources::Subscriber for $name<'_, T> {
            type Transport = T;

            fn transport(&self) -> &T {
                self.transport
            }
        }
    };
}

pub mod account;
pub mod market;
pub mod profile;
pub mod trade;
pub mod transfer;

pub use account::{Accounts, CoinbaseAccounts, Fees, Users};
pub use market::{Currencies, Oracle, Products, Time};
pub use profile::{Profiles, Reports};
pub use trade::{Conversions, Orders};
pub use transfer::Transfers;

/// A resource group bound to a transport
pub trait Subscriber {
    type Transport: Transport + ?Sized;

    fn transport(&self) -> &Self::Transport;

    /// Whether a raw response should be treated as failed
    fn error(&self, response: &RawResponse) -> bool {
        response.status() != StatusCode::OK
    }

    /// Decode a response, or turn a flagged one into an API error
    fn decode<D: DeserializeOwned>(&self, response: RawResponse) -> Result<D> {
        if self.error(&response) {
            return Err(api_error(&response));
        }
        response.json()
    }

    /// Decode every page of a paginated listing, in order
    fn decode_pages(&self, pages: Vec<RawResponse>) -> Result<Vec<Value>> {
        pages.into_iter().map(|page| self.decode(page)).collect()
    }
}

/// Entry points for every resource group
pub trait Resources: Transport {
    fn accounts(&self) -> Accounts<'_, Self> {
        Accounts::new(self)
    }

    fn coinbase_accounts(&self) -> CoinbaseAccounts<'_, Self> {
        CoinbaseAccounts::new(self)
    }

    fn conversions(&self) -> Conversions<'_, Self> {
        Conversions::new(self)
    }

    fn currencies(&self) -> Currencies<'_, Self> {
        Currencies::new(self)
    }

    fn transfers(&self) -> Transfers<'_, Self> {
        Transfers::new(self)
    }

    fn fees(&self) -> Fees<'_, Self> {
        Fees::new(self)
    }

    fn orders(&self) -> Orders<'_, Self> {
        Orders::new(self)
    }

    fn oracle(&self) -> Oracle<'_, Self> {
        Oracle::new(self)
    }

    fn products(&self) -> Products<'_, Self> {
        Products::new(self)
    }

    fn profiles(&self) -> Profiles<'_, Self> {
        Profiles::new(self)
    }

    fn reports(&self) -> Reports<'_, Self> {
        Reports::new(self)
    }

    fn users(&self) -> Users<'_, Self> {
        Users::new(self)
    }

    fn time(&self) -> Time<'_, Self> {
        Time::new(self)
    }
}

impl<T: Transport + ?Sized> Resources for T {}

/// API error carrying the body's `message` field, or the raw text
fn api_error(response: &RawResponse) -> CoinbaseError {
    let message = response
        .json::<Value>()
        .ok()
        .and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| response.text().into_owned());
    CoinbaseError::api_error(response.status(), message)
}
