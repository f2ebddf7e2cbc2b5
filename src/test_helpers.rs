use chrono::NaiveDate;

use crate::domain::booking::Guest;
use crate::domain::calendar::CalendarDay;
use crate::domain::dates::DateRange;
use crate::domain::listing::Listing;
use crate::domain::pricing::PriceBreakdown;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

pub fn range(check_in: &str, check_out: &str) -> DateRange {
    DateRange::new(date(check_in), date(check_out)).expect("valid test range")
}

pub fn available_days(range: DateRange) -> Vec<CalendarDay> {
    range.iter().map(CalendarDay::available).collect()
}

pub fn make_listing(id: &str, base_price: f64) -> Listing {
    Listing {
        id: id.into(),
        name: format!("Listing {id}"),
        base_price,
        currency: "EUR".into(),
        min_nights: 1,
    }
}

pub fn make_guest() -> Guest {
    Guest {
        name: "Alice Martin".into(),
        email: "alice@example.com".into(),
        phone: "+33 6 12 34 56 78".into(),
        party_size: 2,
        special_requests: None,
    }
}

pub fn make_price(nights: u32) -> PriceBreakdown {
    let nightly_subtotal = f64::from(nights) * 100.0;
    let service_fee = nightly_subtotal * 0.05;
    PriceBreakdown {
        nights,
        nightly_subtotal,
        service_fee,
        total: nightly_subtotal + service_fee,
        currency: "EUR".into(),
    }
}
