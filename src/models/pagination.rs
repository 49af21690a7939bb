use mongodb::bson::Document;
use serde::Deserialize;

use crate::errors::{AppError, AppResult};
use crate::store::{FindQuery, Sort, SortOrder};

/// Query string shared by the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub language: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Per-resource listing defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListDefaults {
    pub sort_by: Option<&'static str>,
    /// `None` returns every document unless the caller passes `limit`.
    pub limit: Option<i64>,
}

pub fn parse_sort_order(value: Option<&str>) -> AppResult<SortOrder> {
    match value {
        None | Some("asc") => Ok(SortOrder::Asc),
        Some("desc") => Ok(SortOrder::Desc),
        Some(_) => Err(AppError::bad_request(
            "Invalid sort_order parameter. Use 'asc' or 'desc'.",
        )),
    }
}

impl ListQuery {
    pub fn to_find_query(&self, filter: Document, defaults: ListDefaults) -> AppResult<FindQuery> {
        let order = parse_sort_order(self.sort_order.as_deref())?;

        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err(AppError::bad_request("page must be a positive integer"));
        }
        let limit = self.limit.or(defaults.limit);
        if matches!(limit, Some(limit) if limit < 1) {
            return Err(AppError::bad_request("limit must be a positive integer"));
        }

        let sort = self
            .sort_by
            .as_deref()
            .or(defaults.sort_by)
            .map(|field| Sort {
                field: field.to_string(),
                order,
            });

        // Without a limit there is a single page.
        let skip = limit.map_or(0, |limit| (page - 1).saturating_mul(limit) as u64);

        Ok(FindQuery {
            filter,
            sort,
            skip,
            limit,
        })
    }
}
