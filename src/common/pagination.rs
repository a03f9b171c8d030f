use crate::common::error::AppError;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageParams {
    pub fn resolve(&self, default_size: u64, max_size: u64) -> Result<PageRequest, AppError> {
        let page = self.page.unwrap_or(1);
        if page == 0 {
            return Err(AppError::NotFound("Page"));
        }

        let page_size = match self.page_size {
            None | Some(0) => default_size,
            Some(size) => size,
        }
        .clamp(1, max_size.max(1));

        // The offset is bound as a Postgres BIGINT, so it must fit in i64.
        let reachable = (page - 1)
            .checked_mul(page_size)
            .is_some_and(|offset| i64::try_from(offset).is_ok());
        if !reachable {
            return Err(AppError::NotFound("Page"));
        }

        Ok(PageRequest { page, page_size })
    }
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<u64>,
    pub previous: Option<u64>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Wraps one page of `results` out of `count` matching records.
    pub fn new(results: Vec<T>, count: u64, request: PageRequest) -> Result<Self, AppError> {
        if request.page > 1 && request.offset() >= count {
            return Err(AppError::NotFound("Page"));
        }

        let next = (request.offset().saturating_add(request.limit()) < count)
            .then(|| request.page + 1);
        let previous = (request.page > 1).then(|| request.page - 1);

        Ok(Self {
            count,
            next,
            previous,
            results,
        })
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
