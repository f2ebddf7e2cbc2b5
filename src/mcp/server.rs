use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;
use tokio::sync::RwLock;

use chrono::{Days, Local};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ListResourceTemplatesResult, ListResourcesResult,
        PaginatedRequestParams, ProtocolVersion, RawResource, RawResourceTemplate,
        ReadResourceRequestParams, ReadResourceResult, Resource, ResourceContents,
        ResourceTemplate, ServerCapabilities, ServerInfo,
    },
    schemars,
    service::RequestContext,
    tool, tool_handler, tool_router,
};

use crate::domain::availability::{self, Availability};
use crate::domain::booking::Guest;
use crate::domain::calendar::CalendarView;
use crate::domain::dates::{self, DateRange};
use crate::domain::pricing;
use crate::ports::booking_repo::BookingRepository;
use crate::ports::calendar_store::CalendarStore;
use crate::ports::listing_directory::ListingDirectory;
use crate::services::blocking::BlockingService;
use crate::services::booking::{BookingRequest, BookingService};

// ---------- Resource Store ----------

/// Thread-safe store of engine outputs exposed as MCP resources.
/// Keys are URIs like `booking://booking/BK-ABCD1234`, values are text.
#[derive(Clone, Default)]
pub struct ResourceStore {
    entries: Arc<RwLock<HashMap<String, ResourceEntry>>>,
}

#[derive(Clone)]
struct ResourceEntry {
    name: String,
    text: String,
}

impl ResourceStore {
    async fn insert(&self, uri: impl Into<String>, name: impl Into<String>, text: String) {
        self.entries.write().await.insert(
            uri.into(),
            ResourceEntry {
                name: name.into(),
                text,
            },
        );
    }

    async fn get(&self, uri: &str) -> Option<ResourceEntry> {
        self.entries.read().await.get(uri).cloned()
    }

    async fn list(&self) -> Vec<(String, String)> {
        self.entries
            .read()
            .await
            .iter()
            .map(|(uri, entry)| (uri.clone(), entry.name.clone()))
            .collect()
    }
}

impl std::fmt::Debug for ResourceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStore").finish()
    }
}

// ---------- Tool parameter types ----------

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CalendarToolParams {
    /// Listing ID from booking_listings
    pub listing_id: String,
    /// First date of the horizon (YYYY-MM-DD). Defaults to today.
    pub from: Option<String>,
    /// Horizon length in days (1-730). Defaults to the configured horizon.
    pub days: Option<u32>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AvailabilityToolParams {
    /// Listing ID from booking_listings
    pub listing_id: String,
    /// Check-in date (YYYY-MM-DD), first night of the stay
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD), exclusive — the departure day is not a night of the stay
    pub check_out: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct QuoteToolParams {
    /// Listing ID from booking_listings
    pub listing_id: String,
    /// Check-in date (YYYY-MM-DD)
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD, exclusive)
    pub check_out: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CreateBookingToolParams {
    /// Listing ID from booking_listings
    pub listing_id: String,
    /// Check-in date (YYYY-MM-DD)
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD, exclusive)
    pub check_out: String,
    /// Guest full name
    pub guest_name: String,
    /// Guest email address
    pub guest_email: String,
    /// Guest phone number
    pub guest_phone: String,
    /// Party size (default: 1)
    pub guest_count: Option<u32>,
    /// Free-form special requests passed to the host
    pub special_requests: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct BookingRefToolParams {
    /// Booking reference (e.g. "BK-ABCD1234") returned by booking_create
    pub reference: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ListBookingsToolParams {
    /// Listing ID from booking_listings
    pub listing_id: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct BlockDatesToolParams {
    /// Listing ID from booking_listings
    pub listing_id: String,
    /// First blocked date (YYYY-MM-DD)
    pub from: String,
    /// End of the blocked range (YYYY-MM-DD, exclusive)
    pub to: String,
    /// Optional reason shown on the calendar (e.g. "maintenance")
    pub reason: Option<String>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct UnblockDatesToolParams {
    /// Listing ID from booking_listings
    pub listing_id: String,
    /// First date to unblock (YYYY-MM-DD)
    pub from: String,
    /// End of the range (YYYY-MM-DD, exclusive)
    pub to: String,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SetPricingToolParams {
    /// Listing ID from booking_listings
    pub listing_id: String,
    /// First date of the priced range (YYYY-MM-DD)
    pub from: String,
    /// End of the range (YYYY-MM-DD, exclusive)
    pub to: String,
    /// Nightly price overriding the listing's base rate
    pub price: f64,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ClearPricingToolParams {
    /// Listing ID from booking_listings
    pub listing_id: String,
    /// First date of the range (YYYY-MM-DD)
    pub from: String,
    /// End of the range (YYYY-MM-DD, exclusive)
    pub to: String,
}

// ---------- MCP Server ----------

#[derive(Clone)]
pub struct BookingMcpServer {
    listings: Arc<dyn ListingDirectory>,
    calendar: Arc<dyn CalendarStore>,
    booking: Arc<BookingService>,
    blocking: Arc<BlockingService>,
    service_fee_rate: f64,
    horizon_days: u32,
    tool_router: ToolRouter<Self>,
    resources: ResourceStore,
}

#[tool_router]
impl BookingMcpServer {
    pub fn new(
        listings: Arc<dyn ListingDirectory>,
        calendar: Arc<dyn CalendarStore>,
        bookings: Arc<dyn BookingRepository>,
        service_fee_rate: f64,
        horizon_days: u32,
    ) -> Self {
        let booking = Arc::new(BookingService::new(
            Arc::clone(&listings),
            Arc::clone(&calendar),
            bookings,
            service_fee_rate,
        ));
        let blocking = Arc::new(BlockingService::new(
            Arc::clone(&listings),
            Arc::clone(&calendar),
        ));
        Self {
            listings,
            calendar,
            booking,
            blocking,
            service_fee_rate,
            horizon_days,
            tool_router: Self::tool_router(),
            resources: ResourceStore::default(),
        }
    }

    /// Parse a `from`/`to` admin range from tool input.
    fn parse_admin_range(from: &str, to: &str) -> crate::error::Result<DateRange> {
        DateRange::new(dates::parse_date("from", from)?, dates::parse_date("to", to)?)
    }

    /// List the listings this engine serves.
    #[tool(
        name = "booking_listings",
        description = "List the rental listings this server manages, with base nightly price, currency, and minimum stay. Use this first to get listing IDs for the other tools.",
        annotations(read_only_hint = true)
    )]
    async fn booking_listings(&self) -> Result<CallToolResult, McpError> {
        match self.listings.list().await {
            Ok(listings) => {
                let mut text = String::new();
                if listings.is_empty() {
                    text.push_str("No listings configured.\n");
                } else {
                    let _ = writeln!(text, "{} listings:\n", listings.len());
                    for listing in &listings {
                        let _ = writeln!(
                            text,
                            "- {} ({}): {} {:.2}/night, min {} night(s)",
                            listing.id,
                            if listing.name.is_empty() {
                                "unnamed"
                            } else {
                                listing.name.as_str()
                            },
                            listing.currency,
                            listing.base_price,
                            listing.min_nights,
                        );
                    }
                }
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Failed to list listings: {e}"
            ))])),
        }
    }

    /// Day-by-day calendar for a listing over a horizon.
    #[tool(
        name = "booking_calendar",
        description = "Get the day-by-day calendar for a listing: status (available/booked/blocked) and nightly rate per date. A calendar UI should disable every non-available date. Defaults to the configured horizon starting today.",
        annotations(read_only_hint = true)
    )]
    async fn booking_calendar(
        &self,
        Parameters(params): Parameters<CalendarToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let from = match params.from.as_deref() {
            Some(s) => match dates::parse_date("from", s) {
                Ok(d) => d,
                Err(e) => {
                    return Ok(CallToolResult::error(vec![Content::text(e.to_string())]));
                }
            },
            None => Local::now().date_naive(),
        };
        let days = match params.days {
            Some(d) if !(1..=730).contains(&d) => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "invalid days: must be between 1 and 730, got {d}"
                ))]));
            }
            Some(d) => u64::from(d),
            None => u64::from(self.horizon_days),
        };
        let Some(to) = from.checked_add_days(Days::new(days)) else {
            return Ok(CallToolResult::error(vec![Content::text(
                "Horizon end date out of range".to_string(),
            )]));
        };
        let range = match DateRange::new(from, to) {
            Ok(r) => r,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        };

        let listing = match self.listings.get(&params.listing_id).await {
            Ok(l) => l,
            Err(e) => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Failed to get calendar: {e}. Use booking_listings to find valid IDs."
                ))]));
            }
        };
        match self.calendar.get(&params.listing_id, range).await {
            Ok(days) => {
                let view = CalendarView {
                    listing_id: listing.id.clone(),
                    currency: listing.currency,
                    base_price: listing.base_price,
                    days,
                };
                let text = view.to_string();
                let uri = format!("booking://listing/{}/calendar", listing.id);
                let name = format!("Calendar: listing {}", listing.id);
                self.resources.insert(uri, name, text.clone()).await;
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Failed to get calendar for listing '{}': {e}",
                params.listing_id
            ))])),
        }
    }

    /// Check whether a date range is bookable.
    #[tool(
        name = "booking_availability",
        description = "Check whether a stay is bookable for a listing: verifies every night in [check_in, check_out) is available and the stay meets the minimum length. Reports the exact conflicting dates when it is not.",
        annotations(read_only_hint = true)
    )]
    async fn booking_availability(
        &self,
        Parameters(params): Parameters<AvailabilityToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let range = match DateRange::parse(&params.check_in, &params.check_out) {
            Ok(r) => r,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        };
        let listing = match self.listings.get(&params.listing_id).await {
            Ok(l) => l,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        };
        match self.calendar.get(&params.listing_id, range).await {
            Ok(days) => {
                let text = match availability::is_bookable(&days, listing.min_nights) {
                    Availability::Bookable => format!(
                        "Available: listing {} is free {range} ({} nights).",
                        listing.id,
                        range.nights()
                    ),
                    Availability::TooShort { nights, min_nights } => format!(
                        "Not bookable: {nights} night stay is below the {min_nights}-night minimum for listing {}.",
                        listing.id
                    ),
                    Availability::Unavailable { conflicting_dates } => {
                        let dates: Vec<String> =
                            conflicting_dates.iter().map(ToString::to_string).collect();
                        format!(
                            "Not available: listing {} has conflicts on {}.",
                            listing.id,
                            dates.join(", ")
                        )
                    }
                };
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Failed to check availability: {e}"
            ))])),
        }
    }

    /// Itemized price quote for a stay, without reserving anything.
    #[tool(
        name = "booking_quote",
        description = "Get an itemized price quote for a stay: nightly subtotal (honoring per-night price overrides), service fee, and grand total. Does not reserve anything.",
        annotations(read_only_hint = true)
    )]
    async fn booking_quote(
        &self,
        Parameters(params): Parameters<QuoteToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let range = match DateRange::parse(&params.check_in, &params.check_out) {
            Ok(r) => r,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        };
        let listing = match self.listings.get(&params.listing_id).await {
            Ok(l) => l,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        };
        let days = match self.calendar.get(&params.listing_id, range).await {
            Ok(d) => d,
            Err(e) => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Failed to quote: {e}"
                ))]));
            }
        };
        match availability::is_bookable(&days, listing.min_nights) {
            Availability::Bookable => {}
            Availability::TooShort { nights, min_nights } => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Cannot quote: {nights} night stay is below the {min_nights}-night minimum for listing {}.",
                    listing.id
                ))]));
            }
            Availability::Unavailable { conflicting_dates } => {
                let dates: Vec<String> =
                    conflicting_dates.iter().map(ToString::to_string).collect();
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Cannot quote: dates {} are not available.",
                    dates.join(", ")
                ))]));
            }
        }
        match pricing::quote(
            &days,
            listing.base_price,
            self.service_fee_rate,
            &listing.currency,
        ) {
            Ok(price) => {
                let text = format!("Quote for listing {} {range}:\n{price}", listing.id);
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Failed to quote: {e}"
            ))])),
        }
    }

    /// Create a booking: validate, reserve atomically, price, confirm.
    #[tool(
        name = "booking_create",
        description = "Book a stay: validates the dates and guest details, atomically reserves every night in [check_in, check_out), and returns the confirmed booking with its shareable reference and price breakdown. Fails with the conflicting dates if any night is taken.",
        annotations(read_only_hint = false, idempotent_hint = false)
    )]
    async fn booking_create(
        &self,
        Parameters(params): Parameters<CreateBookingToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let range = match DateRange::parse(&params.check_in, &params.check_out) {
            Ok(r) => r,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        };
        let request = BookingRequest {
            listing_id: params.listing_id,
            range,
            guest: Guest {
                name: params.guest_name,
                email: params.guest_email,
                phone: params.guest_phone,
                party_size: params.guest_count.unwrap_or(1),
                special_requests: params.special_requests,
            },
        };
        match self.booking.create_booking(request).await {
            Ok(booking) => {
                let text = booking.to_string();
                let uri = format!("booking://booking/{}", booking.reference);
                let name = format!("Booking {}", booking.reference);
                self.resources.insert(uri, name, text.clone()).await;
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Booking failed: {e}. Use booking_availability to find open dates."
            ))])),
        }
    }

    /// Cancel a booking and release its nights.
    #[tool(
        name = "booking_cancel",
        description = "Cancel a booking by its reference. Releases every night of the stay back to available; cancelling twice reports an error rather than silently succeeding.",
        annotations(read_only_hint = false)
    )]
    async fn booking_cancel(
        &self,
        Parameters(params): Parameters<BookingRefToolParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.booking.cancel_booking(&params.reference).await {
            Ok(booking) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Cancelled booking {}. Dates {} are available again.",
                booking.reference, booking.range
            ))])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Cancellation failed: {e}"
            ))])),
        }
    }

    /// Look up one booking by reference.
    #[tool(
        name = "booking_get",
        description = "Look up a booking by its shareable reference: status, dates, guest, and price breakdown.",
        annotations(read_only_hint = true)
    )]
    async fn booking_get(
        &self,
        Parameters(params): Parameters<BookingRefToolParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.booking.get_booking(&params.reference).await {
            Ok(booking) => Ok(CallToolResult::success(vec![Content::text(
                booking.to_string(),
            )])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Failed to get booking: {e}"
            ))])),
        }
    }

    /// All bookings for a listing.
    #[tool(
        name = "booking_list",
        description = "List all bookings for a listing, newest first, with status and dates.",
        annotations(read_only_hint = true)
    )]
    async fn booking_list(
        &self,
        Parameters(params): Parameters<ListBookingsToolParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.booking.list_bookings(&params.listing_id).await {
            Ok(bookings) => {
                let mut text = String::new();
                if bookings.is_empty() {
                    let _ = writeln!(text, "No bookings for listing {}.", params.listing_id);
                } else {
                    let _ = writeln!(
                        text,
                        "{} booking(s) for listing {}:\n",
                        bookings.len(),
                        params.listing_id
                    );
                    for booking in &bookings {
                        let _ = writeln!(
                            text,
                            "- {} ({}): {}, {} {:.2}",
                            booking.reference,
                            booking.status,
                            booking.range,
                            booking.price.currency,
                            booking.price.total,
                        );
                    }
                }
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Failed to list bookings: {e}"
            ))])),
        }
    }

    /// Block a range of dates.
    #[tool(
        name = "booking_block_dates",
        description = "Block a date range [from, to) on a listing so it cannot be booked, with an optional reason. Re-blocking already-blocked dates is a no-op success; a range containing a booked night is rejected whole.",
        annotations(read_only_hint = false, idempotent_hint = true)
    )]
    async fn booking_block_dates(
        &self,
        Parameters(params): Parameters<BlockDatesToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let range = match Self::parse_admin_range(&params.from, &params.to) {
            Ok(r) => r,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        };
        match self
            .blocking
            .block_dates(&params.listing_id, range, params.reason)
            .await
        {
            Ok(()) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Blocked {range} on listing {}.",
                params.listing_id
            ))])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Block failed: {e}"
            ))])),
        }
    }

    /// Unblock a range of dates.
    #[tool(
        name = "booking_unblock_dates",
        description = "Unblock a date range [from, to) on a listing. Only blocked dates are released; available or booked dates in the range are left untouched and reported as skipped.",
        annotations(read_only_hint = false)
    )]
    async fn booking_unblock_dates(
        &self,
        Parameters(params): Parameters<UnblockDatesToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let range = match Self::parse_admin_range(&params.from, &params.to) {
            Ok(r) => r,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        };
        match self.blocking.unblock_dates(&params.listing_id, range).await {
            Ok(outcome) => {
                let mut text = format!(
                    "Unblocked {} date(s) on listing {}.",
                    outcome.released.len(),
                    params.listing_id
                );
                if !outcome.skipped.is_empty() {
                    let skipped: Vec<String> =
                        outcome.skipped.iter().map(ToString::to_string).collect();
                    let _ = write!(text, " Skipped (not blocked): {}.", skipped.join(", "));
                }
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Unblock failed: {e}"
            ))])),
        }
    }

    /// Set a custom nightly price for a range.
    #[tool(
        name = "booking_set_pricing",
        description = "Set a custom nightly price for a date range [from, to), overriding the listing's base rate (seasonal or promotional pricing). Rejected if the range contains a booked night — confirmed stays keep their locked-in price.",
        annotations(read_only_hint = false, idempotent_hint = true)
    )]
    async fn booking_set_pricing(
        &self,
        Parameters(params): Parameters<SetPricingToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let range = match Self::parse_admin_range(&params.from, &params.to) {
            Ok(r) => r,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        };
        match self
            .blocking
            .set_custom_pricing(&params.listing_id, range, params.price)
            .await
        {
            Ok(()) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Set nightly price {:.2} for {range} on listing {}.",
                params.price, params.listing_id
            ))])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Pricing update failed: {e}"
            ))])),
        }
    }

    /// Remove custom nightly prices from a range.
    #[tool(
        name = "booking_clear_pricing",
        description = "Remove custom nightly prices from a date range [from, to), reverting those dates to the listing's base rate. Same booked-night rule as booking_set_pricing.",
        annotations(read_only_hint = false, idempotent_hint = true)
    )]
    async fn booking_clear_pricing(
        &self,
        Parameters(params): Parameters<ClearPricingToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let range = match Self::parse_admin_range(&params.from, &params.to) {
            Ok(r) => r,
            Err(e) => return Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        };
        match self
            .blocking
            .clear_custom_pricing(&params.listing_id, range)
            .await
        {
            Ok(()) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Cleared custom pricing for {range} on listing {}.",
                params.listing_id
            ))])),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Pricing update failed: {e}"
            ))])),
        }
    }
}

#[tool_handler]
impl ServerHandler for BookingMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Rental booking engine: availability, pricing, and reservations for a set of listings.\n\
                 \n\
                 ## Guest tools\n\
                 Start with booking_listings to get listing IDs, then:\n\
                 - booking_calendar: day-by-day status and nightly rates over a horizon\n\
                 - booking_availability: check a stay, with the exact conflicting dates on refusal\n\
                 - booking_quote: itemized price (nightly subtotal, service fee, total) without reserving\n\
                 - booking_create: reserve a stay atomically and get a shareable booking reference\n\
                 - booking_get / booking_list / booking_cancel: booking lifecycle\n\
                 \n\
                 ## Host tools\n\
                 - booking_block_dates / booking_unblock_dates: take dates off and back on the market\n\
                 - booking_set_pricing / booking_clear_pricing: per-night price overrides\n\
                 \n\
                 ## Semantics\n\
                 - Dates are ISO calendar dates in the listing's local calendar; ranges are half-open\n\
                   [check_in, check_out) — the departure day is not a night of the stay.\n\
                 - Reservations are all-or-nothing: overlapping concurrent requests never double-book.\n\
                 - Booked nights keep the price they were sold at; later overrides do not affect them.\n\
                 \n\
                 ## Resources\n\
                 Calendars and bookings produced by tools are stored as MCP resources under booking:// URIs."
                    .into(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let entries = self.resources.list().await;
        let resources: Vec<Resource> = entries
            .into_iter()
            .map(|(uri, name)| Resource {
                annotations: None,
                raw: RawResource {
                    uri,
                    name,
                    title: None,
                    description: None,
                    mime_type: Some("text/plain".into()),
                    size: None,
                    icons: None,
                    meta: None,
                },
            })
            .collect();
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        let templates = vec![
            ResourceTemplate {
                annotations: None,
                raw: RawResourceTemplate {
                    uri_template: "booking://listing/{id}/calendar".into(),
                    name: "Listing calendar".into(),
                    title: None,
                    description: Some(
                        "Day-by-day availability and nightly rates for a listing".into(),
                    ),
                    mime_type: Some("text/plain".into()),
                    icons: None,
                },
            },
            ResourceTemplate {
                annotations: None,
                raw: RawResourceTemplate {
                    uri_template: "booking://booking/{reference}".into(),
                    name: "Booking record".into(),
                    title: None,
                    description: Some(
                        "A confirmed booking with guest details and price breakdown".into(),
                    ),
                    mime_type: Some("text/plain".into()),
                    icons: None,
                },
            },
        ];
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        match self.resources.get(&request.uri).await {
            Some(entry) => Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(entry.text, request.uri)],
            }),
            None => Err(McpError::resource_not_found(
                format!("resource not found: {}", request.uri),
                None,
            )),
        }
    }
}
