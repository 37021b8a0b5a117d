use crate::constants::{DEFAULT_MAX_REPORT_SIZE, DEFAULT_REPORT_PATH};
use crate::error::CspError;
use crate::monitoring::report::CspViolationReport;
use crate::monitoring::stats::CspStats;
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::{header::CONTENT_LENGTH, Method},
    Error, HttpMessage, HttpResponse,
};
use bytes::BytesMut;
use futures::future::{ready, LocalBoxFuture, Ready};
use futures::StreamExt;
use std::{borrow::Cow, rc::Rc, sync::Arc};

type ViolationHandler = Arc<dyn Fn(CspViolationReport) + Send + Sync + 'static>;

pub struct CspReportingMiddleware {
    handler: ViolationHandler,
    report_path: Cow<'static, str>,
    max_report_size: usize,
    stats: Arc<CspStats>,
}

impl CspReportingMiddleware {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(CspViolationReport) + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            report_path: Cow::Borrowed(DEFAULT_REPORT_PATH),
            max_report_size: DEFAULT_MAX_REPORT_SIZE,
            stats: Arc::new(CspStats::new()),
        }
    }

    pub fn logging() -> Self {
        Self::new(|report| {
            log::warn!(
                "csp violation: {} blocked {} on {}",
                report.effective_directive,
                report.blocked_uri,
                report.document_uri
            );
        })
    }

    #[inline]
    pub fn with_report_path(mut self, path: impl Into<Cow<'static, str>>) -> Self {
        self.report_path = path.into();
        self
    }

    #[inline]
    pub fn with_max_report_size(mut self, size: usize) -> Self {
        self.max_report_size = size;
        self
    }

    #[inline]
    pub fn with_stats(mut self, stats: Arc<CspStats>) -> Self {
        self.stats = stats;
        self
    }

    #[inline]
    pub fn stats(&self) -> &Arc<CspStats> {
        &self.stats
    }
}

impl<S, B> Transform<S, ServiceRequest> for CspReportingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = CspReportingMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CspReportingMiddlewareService {
            service: Rc::new(service),
            handler: self.handler.clone(),
            report_path: self.report_path.clone(),
            max_report_size: self.max_report_size,
            stats: self.stats.clone(),
        }))
    }
}

pub struct CspReportingMiddlewareService<S> {
    service: Rc<S>,
    handler: ViolationHandler,
    report_path: Cow<'static, str>,
    max_report_size: usize,
    stats: Arc<CspStats>,
}

impl<S, B> Service<ServiceRequest> for CspReportingMiddlewareService<S>
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
        if req.path() != self.report_path || *req.method() != Method::POST {
            let service = self.service.clone();
            return Box::pin(async move {
                let res = service.call(req).await?;
                Ok(res.map_into_left_body())
            });
        }

        let handler = self.handler.clone();
        let max_size = self.max_report_size;
        let stats = self.stats.clone();

        Box::pin(async move {
            let declared = req
                .headers()
                .get(CONTENT_LENGTH)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<usize>().ok());
            if matches!(declared, Some(len) if len > max_size) {
                log::warn!("rejecting csp report declared as {:?} bytes", declared);
                return Err(CspError::ReportError("report too large".to_string()).into());
            }

            let mut payload = req.take_payload();
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk?;
                if body.len() + chunk.len() > max_size {
                    log::warn!("rejecting csp report over {} bytes", max_size);
                    return Err(CspError::ReportError("report too large".to_string()).into());
                }
                body.extend_from_slice(&chunk);
            }

            match CspViolationReport::from_body(&body) {
                Ok(Some(report)) => {
                    stats.increment_violation_count();
                    handler(report);
                }
                Ok(None) => {
                    log::debug!("csp report body without 'csp-report' member");
                }
                Err(e) => {
                    log::warn!("unparsable csp report: {}", e);
                }
            }

            let response = HttpResponse::NoContent().finish().map_into_right_body();
            Ok(req.into_response(response))
        })
    }
}

#[inline]
pub fn csp_reporting_middleware<F>(handler: F) -> CspReportingMiddleware
where
    F: Fn(CspViolationReport) + Send + Sync + 'static,
{
    CspReportingMiddleware::new(handler)
}
