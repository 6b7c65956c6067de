//! Error-normalizing middleware.
//!
//! Wraps the whole route tree so that every failure leaving a handler,
//! an extractor, or an inner middleware passes through one pipeline:
//! classify, shape, log once, and re-raise as the normalized
//! [`ApiError`](crate::handlers::error::ApiError). Responses the inner
//! service produced successfully pass through untouched.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::handlers::error::{normalize, Raised};

/// Middleware normalizing every request failure into the stable
/// error envelope.
pub struct ErrorNormalizer;

impl<S, B> Transform<S, ServiceRequest> for ErrorNormalizer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorNormalizerService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorNormalizerService {
            service: Rc::new(service),
        }))
    }
}

pub struct ErrorNormalizerService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ErrorNormalizerService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future =
        std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        // The request is consumed by the inner service, so capture the
        // path for the envelope up front.
        let path = req.path().to_string();

        Box::pin(async move {
            match service.call(req).await {
                Ok(response) => Ok(response),
                Err(error) => Err(normalize(&Raised::from_actix(&error), &path).into()),
            }
        })
    }
}
