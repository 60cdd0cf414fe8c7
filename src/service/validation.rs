use serde_json::Value;
use validator::ValidateEmail;

use crate::dto::bid_request_dto::SubmitBidRequest;
use crate::model::bid_request::NewBidRequest;

pub const PROJECT_TYPES: &[&str] = &[
    "brand-identity",
    "web-design",
    "print-design",
    "digital-marketing",
    "ui-ux",
    "packaging",
    "other",
];

pub const BUDGETS: &[&str] = &[
    "under-5k",
    "5k-10k",
    "10k-25k",
    "25k-50k",
    "50k-100k",
    "over-100k",
];

pub const TIMELINES: &[&str] = &["asap", "1-month", "2-3-months", "3-6-months", "6-months-plus"];

pub const REFERRALS: &[&str] = &["search", "social", "referral", "portfolio", "other"];

const MIN_DESCRIPTION_LENGTH: usize = 10;

/// Trim and HTML-escape one inbound string. Values are interpolated into
/// HTML email bodies later, so markup is neutralized before storage.
fn sanitize(input: &str) -> String {
    html_escape::encode_safe(input.trim()).into_owned()
}

fn is_valid_phone(phone: &str) -> bool {
    phone
        .chars()
        .all(|c| c.is_ascii_digit() || " -+().".contains(c))
}

/// Validate a raw submission against the field rules, accumulating every
/// violation. Length and syntax checks run on the trimmed raw value; the
/// stored value is the trimmed, escaped form.
pub fn validate(dto: &SubmitBidRequest) -> Result<NewBidRequest, Vec<String>> {
    let mut errors = Vec::new();

    let first_name = dto.first_name.as_deref().unwrap_or("").trim().to_string();
    if first_name.is_empty() {
        errors.push("First name is required".to_string());
    }

    let last_name = dto.last_name.as_deref().unwrap_or("").trim().to_string();
    if last_name.is_empty() {
        errors.push("Last name is required".to_string());
    }

    let email = dto.email.as_deref().unwrap_or("").trim().to_string();
    if !email.validate_email() {
        errors.push("Valid email is required".to_string());
    }

    let phone = dto
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string);
    if let Some(ref p) = phone {
        if !is_valid_phone(p) {
            errors.push("Valid phone number required".to_string());
        }
    }

    let company = dto
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    let project_type = dto.project_type.as_deref().unwrap_or("").trim().to_string();
    if project_type.is_empty() {
        errors.push("Project type is required".to_string());
    } else if !PROJECT_TYPES.contains(&project_type.as_str()) {
        errors.push("Invalid project type value".to_string());
    }

    let project_title = dto.project_title.as_deref().unwrap_or("").trim().to_string();
    if project_title.is_empty() {
        errors.push("Project title is required".to_string());
    }

    let description = dto.description.as_deref().unwrap_or("").trim().to_string();
    if description.is_empty() {
        errors.push("Description is required".to_string());
    } else if description.chars().count() < MIN_DESCRIPTION_LENGTH {
        errors.push(format!(
            "Description must be at least {} characters",
            MIN_DESCRIPTION_LENGTH
        ));
    }

    let budget = dto.budget.as_deref().unwrap_or("").trim().to_string();
    if budget.is_empty() {
        errors.push("Budget is required".to_string());
    } else if !BUDGETS.contains(&budget.as_str()) {
        errors.push("Invalid budget value".to_string());
    }

    let timeline = dto.timeline.as_deref().unwrap_or("").trim().to_string();
    if timeline.is_empty() {
        errors.push("Timeline is required".to_string());
    } else if !TIMELINES.contains(&timeline.as_str()) {
        errors.push("Invalid timeline value".to_string());
    }

    // Absent services normalize to the empty set; anything other than an
    // array of strings is a field error, not a parse failure.
    let services: Vec<String> = match &dto.services {
        None => Vec::new(),
        Some(Value::Array(items)) => {
            if items.iter().all(Value::is_string) {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(sanitize)
                    .collect()
            } else {
                errors.push("Services must be an array".to_string());
                Vec::new()
            }
        }
        Some(_) => {
            errors.push("Services must be an array".to_string());
            Vec::new()
        }
    };

    let referral = dto
        .referral
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);
    if let Some(ref r) = referral {
        if !REFERRALS.contains(&r.as_str()) {
            errors.push("Invalid referral value".to_string());
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewBidRequest {
        first_name: sanitize(&first_name),
        last_name: sanitize(&last_name),
        email: sanitize(&email),
        phone: phone.as_deref().map(sanitize),
        company: company.as_deref().map(sanitize),
        project_type: sanitize(&project_type),
        project_title: sanitize(&project_title),
        description: sanitize(&description),
        budget: sanitize(&budget),
        timeline: sanitize(&timeline),
        services,
        referral: referral.as_deref().map(sanitize),
    })
}
