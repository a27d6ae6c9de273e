//! Handler trait and closure adapter.

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;

use axum::body::Body;
use axum::http::Request;

use super::exception::HttpException;
use super::reply::{IntoReply, Reply};
use crate::routing::PathParams;

/// Boxed future for handler results.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A route handler: one route's logic for one HTTP method.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: Request<Body>, params: PathParams) -> BoxFuture<'static, Result<Reply, HttpException>>;
}

/// Adapts an async closure returning any [`IntoReply`] into a [`Handler`].
pub struct FnHandler<F, Fut, R>
where
    F: Fn(Request<Body>, PathParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, HttpException>> + Send + 'static,
    R: IntoReply + 'static,
{
    handler: F,
    _phantom: PhantomData<fn() -> (Fut, R)>,
}

impl<F, Fut, R> FnHandler<F, Fut, R>
where
    F: Fn(Request<Body>, PathParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, HttpException>> + Send + 'static,
    R: IntoReply + 'static,
{
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }
}

impl<F, Fut, R> Handler for FnHandler<F, Fut, R>
where
    F: Fn(Request<Body>, PathParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, HttpException>> + Send + 'static,
    R: IntoReply + 'static,
{
    fn call(&self, request: Request<Body>, params: PathParams) -> BoxFuture<'static, Result<Reply, HttpException>> {
        let fut = (self.handler)(request, params);
        Box::pin(async move { fut.await?.into_reply() })
    }
}
