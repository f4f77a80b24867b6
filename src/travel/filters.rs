//! # List Filters & Pagination
//!
//! Query-side contract for listing travel requests: optional filters on
//! name, status, and the travel dates, plus bounded pagination with
//! collection metadata alongside the data.
//!
//! Results are ordered newest first (`created_at` descending) with a
//! stable tie-break on `id` descending.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::{TravelResult, ValidationErrors};
use super::request::{TravelRequest, TravelRequestStatus};

/// Page size bounds
pub const MIN_PER_PAGE: usize = 1;
pub const MAX_PER_PAGE: usize = 100;
pub const DEFAULT_PER_PAGE: usize = 15;

/// Raw query parameters, as they arrive on the wire
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub per_page: Option<i64>,
    #[serde(default)]
    pub page: Option<i64>,
}

impl ListParams {
    /// Validate and convert into a typed filter + page request
    pub fn into_query(self) -> TravelResult<(ListFilter, PageRequest)> {
        let mut errors = ValidationErrors::new();

        let status = match self.status.as_deref() {
            None | Some("") => None,
            Some(raw) => match TravelRequestStatus::parse(raw) {
                Some(status) => Some(status),
                None => {
                    errors.add(
                        "status",
                        format!(
                            "The status must be one of: {}.",
                            TravelRequestStatus::VALUES.join(", ")
                        ),
                    );
                    None
                }
            },
        };

        let departure_from = parse_date(&mut errors, "departure_date", self.departure_date);
        let return_until = parse_date(&mut errors, "return_date", self.return_date);

        let per_page = match self.per_page {
            None => DEFAULT_PER_PAGE,
            Some(n) if (MIN_PER_PAGE as i64..=MAX_PER_PAGE as i64).contains(&n) => n as usize,
            Some(_) => {
                errors.add(
                    "per_page",
                    format!(
                        "The per page value must be between {} and {}.",
                        MIN_PER_PAGE, MAX_PER_PAGE
                    ),
                );
                DEFAULT_PER_PAGE
            }
        };

        let page = match self.page {
            None => 1,
            Some(n) if n >= 1 => n as usize,
            Some(_) => {
                errors.add("page", "The page must be at least 1.");
                1
            }
        };

        errors.into_result()?;

        Ok((
            ListFilter {
                name: self.name.filter(|n| !n.is_empty()),
                status,
                departure_from,
                return_until,
            },
            PageRequest { per_page, page },
        ))
    }
}

fn parse_date(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<String>,
) -> Option<NaiveDate> {
    match value.as_deref() {
        None | Some("") => None,
        Some(raw) => match raw.parse::<NaiveDate>() {
            Ok(date) => Some(date),
            Err(_) => {
                errors.add(
                    field,
                    format!("The {} must be a valid date.", field.replace('_', " ")),
                );
                None
            }
        },
    }
}

/// Typed listing filter (AND semantics across present fields)
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Case-insensitive substring match on the trip name
    pub name: Option<String>,

    /// Exact status match
    pub status: Option<TravelRequestStatus>,

    /// Keep requests departing on or after this date
    pub departure_from: Option<NaiveDate>,

    /// Keep requests returning on or before this date
    pub return_until: Option<NaiveDate>,
}

impl ListFilter {
    /// Whether a record satisfies every present filter
    pub fn matches(&self, request: &TravelRequest) -> bool {
        if let Some(name) = &self.name {
            if !request.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }

        if let Some(status) = self.status {
            if request.status != status {
                return false;
            }
        }

        if let Some(from) = self.departure_from {
            if request.departure_date < from {
                return false;
            }
        }

        if let Some(until) = self.return_until {
            if request.return_date > until {
                return false;
            }
        }

        true
    }
}

/// Validated pagination request
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    /// Items per page, within [`MIN_PER_PAGE`]..=[`MAX_PER_PAGE`]
    pub per_page: usize,

    /// 1-based page number
    pub page: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            page: 1,
        }
    }
}

/// One page of results with collection metadata
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    /// Total records matching the filter
    pub total: usize,

    /// Requested page size
    pub per_page: usize,

    /// 1-based page that was returned
    pub current_page: usize,

    /// Last page that contains data (1 when empty)
    pub last_page: usize,
}

impl<T> Page<T> {
    /// Slice an already-filtered, already-ordered collection into one page
    pub fn paginate(items: Vec<T>, request: &PageRequest) -> Self {
        let total = items.len();
        let last_page = total.div_ceil(request.per_page).max(1);

        let data: Vec<T> = items
            .into_iter()
            .skip((request.page - 1) * request.per_page)
            .take(request.per_page)
            .collect();

        Self {
            data,
            meta: PageMeta {
                total,
                per_page: request.per_page,
                current_page: request.page,
                last_page,
            },
        }
    }
}
