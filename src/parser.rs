//! Response body parsers
//!
//! A parser turns the raw body text of a terminal response into the value handed
//! to the success or error handler. The same parser is used for both.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::Result;

/// Converts a response body into a value
pub trait ResponseParser {
    type Output;

    fn parse(&self, body: String) -> Result<Self::Output>;
}

/// Identity parser: hands the body text through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct RawText;

impl ResponseParser for RawText {
    type Output = String;

    fn parse(&self, body: String) -> Result<String> {
        Ok(body)
    }
}

/// Decodes the body as JSON into `T` (a `serde_json::Value` by default)
pub struct Json<T = serde_json::Value>(PhantomData<fn() -> T>);

impl<T> Json<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Json<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Json<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Json<T> {}

impl<T> std::fmt::Debug for Json<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Json<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> ResponseParser for Json<T> {
    type Output = T;

    fn parse(&self, body: String) -> Result<T> {
        Ok(serde_json::from_str(&body)?)
    }
}

/// Parser backed by a closure, see [`from_fn`]
#[derive(Clone, Copy)]
pub struct FnParser<F>(F);

/// Wrap a closure as a [`ResponseParser`]
pub fn from_fn<F, T>(f: F) -> FnParser<F>
where
    F: Fn(String) -> Result<T>,
{
    FnParser(f)
}

impl<F, T> ResponseParser for FnParser<F>
where
    F: Fn(String) -> Result<T>,
{
    type Output = T;

    fn parse(&self, body: String) -> Result<T> {
        (self.0)(body)
    }
}
