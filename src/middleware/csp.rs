use crate::constants::HEADER_CSP_NONCE;
use crate::core::config::SecurityConfig;
use crate::core::policy::PolicyBuilder;
use crate::error::CspError;
use crate::monitoring::stats::CspStats;
use crate::security::headers::HeaderApplier;
use crate::security::nonce::{Nonce, NonceGenerator, RequestNonce};
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::{rc::Rc, sync::Arc};

#[derive(Clone)]
pub struct CspMiddleware {
    config: Arc<SecurityConfig>,
    generator: Arc<NonceGenerator>,
    stats: Arc<CspStats>,
}

impl CspMiddleware {
    #[inline]
    pub fn new(config: SecurityConfig) -> Self {
        Self {
            config: Arc::new(config),
            generator: Arc::new(NonceGenerator::default()),
            stats: Arc::new(CspStats::new()),
        }
    }

    #[inline]
    pub fn with_nonce_generator(mut self, generator: NonceGenerator) -> Self {
        self.generator = Arc::new(generator);
        self
    }

    #[inline]
    pub fn with_stats(mut self, stats: Arc<CspStats>) -> Self {
        self.stats = stats;
        self
    }

    #[inline]
    pub fn config(&self) -> Arc<SecurityConfig> {
        self.config.clone()
    }

    #[inline]
    pub fn stats(&self) -> &Arc<CspStats> {
        &self.stats
    }
}

impl<S, B> Transform<S, ServiceRequest> for CspMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = CspMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CspMiddlewareService {
            service: Rc::new(service),
            config: self.config.clone(),
            generator: self.generator.clone(),
            stats: self.stats.clone(),
        }))
    }
}

pub struct CspMiddlewareService<S> {
    service: Rc<S>,
    config: Arc<SecurityConfig>,
    generator: Arc<NonceGenerator>,
    stats: Arc<CspStats>,
}

struct PreparedHeaders {
    nonce: Nonce,
    csp_value: HeaderValue,
    nonce_value: HeaderValue,
}

fn prepare(
    generator: &NonceGenerator,
    config: &SecurityConfig,
    stats: &CspStats,
) -> Result<PreparedHeaders, CspError> {
    let nonce = generator.generate()?;
    stats.increment_nonce_generation_count();

    let policy = PolicyBuilder::build(&nonce, config.allowlists(), config.mode());
    let csp_value = policy.header_value()?;
    let nonce_value = nonce.header_value()?;

    Ok(PreparedHeaders {
        nonce,
        csp_value,
        nonce_value,
    })
}

impl<S, B> Service<ServiceRequest> for CspMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        if self.config.exclusions().is_excluded(req.path()) {
            log::trace!("skipping static asset {}", req.path());
            self.stats.increment_skipped_count();
            let service = self.service.clone();
            return Box::pin(async move {
                let res = service.call(req).await?;
                Ok(res.map_into_left_body())
            });
        }

        let service = self.service.clone();
        let config = self.config.clone();
        let generator = self.generator.clone();
        let stats = self.stats.clone();

        Box::pin(async move {
            stats.increment_request_count();

            let prepared = prepare(&generator, &config, &stats).map_err(|e| {
                stats.increment_nonce_failure_count();
                log::error!("refusing to serve {} without a nonce: {}", req.path(), e);
                e
            })?;

            // The rendering layer reads the nonce from either place; a client
            // supplied header of the same name is overwritten.
            req.headers_mut().insert(
                HeaderName::from_static(HEADER_CSP_NONCE),
                prepared.nonce_value.clone(),
            );
            req.extensions_mut()
                .insert(RequestNonce::from(&prepared.nonce));

            log::debug!("issued csp nonce for {}", req.path());

            let http_req = req.request().clone();
            let mut res = match service.call(req).await {
                Ok(res) => res.map_into_left_body(),
                Err(e) => {
                    log::debug!("inner service failed for {}: {}", http_req.path(), e);
                    ServiceResponse::from_err(e, http_req).map_into_right_body()
                }
            };

            HeaderApplier::apply(
                res.headers_mut(),
                config.headers(),
                prepared.csp_value,
                prepared.nonce_value,
                config.mode().report_only,
            );

            Ok(res)
        })
    }
}

#[inline]
pub fn csp_middleware(config: SecurityConfig) -> CspMiddleware {
    CspMiddleware::new(config)
}

pub fn csp_middleware_from_env() -> Result<CspMiddleware, CspError> {
    SecurityConfig::from_env().map(CspMiddleware::new)
}
