//! Donation business logic - the food/money tagged union, validation, and
//! ownership-checked CRUD.
//!
//! A donation is either food or money, never a mix: the domain type is a
//! two-variant sum and the flattened storage row is only ever produced from
//! one variant, so the unused half of the column set stays NULL by
//! construction rather than by request-scrubbing.

use crate::{
    core::waste::WasteUnit,
    entities::{Donation, donation},
    errors::{Error, FieldError, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// Default currency for money donations.
pub const DEFAULT_CURRENCY: &str = "KES";

/// Closed set of donation lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonationStatus {
    /// Registered, awaiting review
    Pending,
    /// Approved and visible to recipients
    Approved,
    /// Picked up from the donor
    Collected,
    /// Delivered to the recipient
    Delivered,
    /// Withdrawn or rejected
    Cancelled,
}

impl DonationStatus {
    /// All states, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Approved,
        Self::Collected,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Canonical wire string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Collected => "collected",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a canonical wire string; `None` for out-of-enum values.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s)
    }
}

/// Closed set of food-type categories for food donations.
pub const DONATION_FOOD_TYPES: [&str; 9] = [
    "prepared-food",
    "fresh-produce",
    "baked-goods",
    "dairy",
    "meat",
    "pantry-items",
    "frozen",
    "beverages",
    "other",
];

/// Closed set of payment channels for money donations.
pub const PAYMENT_METHODS: [&str; 4] = ["paystack", "bank-transfer", "Safaricom M-pesa", "other"];

/// The food-specific half of a donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodDonation {
    /// Food-type category, one of [`DONATION_FOOD_TYPES`]
    pub food_type: String,
    /// Free-text magnitude
    #[serde(default)]
    pub quantity: Option<String>,
    /// Measurement unit, shared with waste records
    #[serde(default)]
    pub unit: Option<String>,
    /// Expiry date of the donated food
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    /// Where the food can be collected
    #[serde(default)]
    pub pickup_location: Option<String>,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
}

/// The money-specific half of a donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyDonation {
    /// Donated amount, strictly positive
    pub amount: f64,
    /// Currency code, defaults to [`DEFAULT_CURRENCY`]
    #[serde(default)]
    pub currency: Option<String>,
    /// Payment channel, one of [`PAYMENT_METHODS`]
    #[serde(default)]
    pub payment_method: Option<String>,
    /// External transaction reference
    #[serde(default)]
    pub transaction_id: Option<String>,
}

/// What was donated - exactly one of the two shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DonationDetails {
    /// A food donation
    #[serde(rename = "food")]
    Food(FoodDonation),
    /// A money donation
    #[serde(rename = "money")]
    Money(MoneyDonation),
}

/// Incoming donation payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDonation {
    /// What is being donated
    #[serde(flatten)]
    pub details: DonationDetails,
    /// Initial lifecycle status; defaults to pending
    #[serde(default)]
    pub status: Option<String>,
    /// Receiving user, once known
    #[serde(default)]
    pub recipient_id: Option<String>,
    /// Optional free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// Domain view of a stored donation - the tagged union plus common fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationView {
    /// Unique identifier
    pub id: i64,
    /// Identity of the donating user
    pub donor_id: String,
    /// What was donated
    #[serde(flatten)]
    pub details: DonationDetails,
    /// Lifecycle status
    pub status: String,
    /// Receiving user, once assigned
    pub recipient_id: Option<String>,
    /// Optional free-text notes
    pub notes: Option<String>,
    /// When the donation was registered
    pub created_at: DateTimeUtc,
    /// When the donation was last updated
    pub updated_at: DateTimeUtc,
}

impl TryFrom<donation::Model> for DonationView {
    type Error = Error;

    fn try_from(model: donation::Model) -> Result<Self> {
        let details = match model.donation_type.as_str() {
            "food" => DonationDetails::Food(FoodDonation {
                food_type: model.food_type.unwrap_or_default(),
                quantity: model.quantity,
                unit: model.unit,
                expiry_date: model.expiry_date,
                pickup_location: model.pickup_location,
                description: model.description,
            }),
            "money" => DonationDetails::Money(MoneyDonation {
                amount: model.amount.unwrap_or_default(),
                currency: model.currency,
                payment_method: model.payment_method,
                transaction_id: model.transaction_id,
            }),
            other => {
                return Err(Error::Config {
                    message: format!("Unknown donation type in storage: {other}"),
                });
            }
        };

        Ok(Self {
            id: model.id,
            donor_id: model.donor_id,
            details,
            status: model.status,
            recipient_id: model.recipient_id,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

fn validate(input: &NewDonation) -> Result<DonationStatus> {
    let mut errors = Vec::new();

    match &input.details {
        DonationDetails::Food(food) => {
            if !DONATION_FOOD_TYPES.contains(&food.food_type.as_str()) {
                errors.push(FieldError::new("foodType", "Invalid food type"));
            }
            if let Some(unit) = &food.unit {
                if WasteUnit::parse(unit).is_none() {
                    errors.push(FieldError::new("unit", "Invalid unit"));
                }
            }
        }
        DonationDetails::Money(money) => {
            if !money.amount.is_finite() || money.amount <= 0.0 {
                errors.push(FieldError::new("amount", "Amount must be positive"));
            }
            if let Some(method) = &money.payment_method {
                if !PAYMENT_METHODS.contains(&method.as_str()) {
                    errors.push(FieldError::new("paymentMethod", "Invalid payment method"));
                }
            }
        }
    }

    let status = match &input.status {
        None => Some(DonationStatus::Pending),
        Some(raw) => {
            let parsed = DonationStatus::parse(raw);
            if parsed.is_none() {
                errors.push(FieldError::new("status", "Invalid status"));
            }
            parsed
        }
    };

    match status {
        Some(st) if errors.is_empty() => Ok(st),
        _ => Err(Error::validation(errors)),
    }
}

/// Spreads the tagged union over the flattened column set. The variant not
/// taken leaves its columns unset (NULL).
fn apply_details(active: &mut donation::ActiveModel, details: DonationDetails) {
    match details {
        DonationDetails::Food(food) => {
            active.donation_type = Set("food".to_string());
            active.food_type = Set(Some(food.food_type));
            active.quantity = Set(food.quantity);
            active.unit = Set(food.unit);
            active.expiry_date = Set(food.expiry_date);
            active.pickup_location = Set(food.pickup_location);
            active.description = Set(food.description);
            active.amount = Set(None);
            active.currency = Set(None);
            active.payment_method = Set(None);
            active.transaction_id = Set(None);
        }
        DonationDetails::Money(money) => {
            active.donation_type = Set("money".to_string());
            active.food_type = Set(None);
            active.quantity = Set(None);
            active.unit = Set(None);
            active.expiry_date = Set(None);
            active.pickup_location = Set(None);
            active.description = Set(None);
            active.amount = Set(Some(money.amount));
            active.currency = Set(Some(
                money.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            ));
            active.payment_method = Set(money.payment_method);
            active.transaction_id = Set(money.transaction_id);
        }
    }
}

async fn find_owned(db: &DatabaseConnection, user_id: &str, id: i64) -> Result<donation::Model> {
    let model = Donation::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Donation",
            id: id.to_string(),
        })?;

    if model.donor_id != user_id {
        return Err(Error::Forbidden {
            resource: "donation",
            id: id.to_string(),
        });
    }

    Ok(model)
}

/// Optional filters for the donor-scoped listing.
#[derive(Debug, Clone, Default)]
pub struct DonationFilter {
    /// Restrict to one donation type (`food` / `money`)
    pub donation_type: Option<String>,
    /// Restrict to one lifecycle status
    pub status: Option<String>,
}

/// One page of a donor's donations.
#[derive(Debug, Clone)]
pub struct DonationPage {
    /// Donations on this page, newest first
    pub donations: Vec<DonationView>,
    /// Total donations matching the filter
    pub total: u64,
}

/// Lists one page of the caller's own donations, newest first.
pub async fn list_donations(
    db: &DatabaseConnection,
    user_id: &str,
    filter: &DonationFilter,
    page: u64,
    limit: u64,
) -> Result<DonationPage> {
    let page = page.max(1);
    let limit = limit.max(1);

    let mut query = Donation::find().filter(donation::Column::DonorId.eq(user_id));
    if let Some(donation_type) = &filter.donation_type {
        query = query.filter(donation::Column::DonationType.eq(donation_type));
    }
    if let Some(status) = &filter.status {
        query = query.filter(donation::Column::Status.eq(status));
    }

    let total = query.clone().count(db).await?;
    let models = query
        .order_by_desc(donation::Column::CreatedAt)
        .offset((page - 1) * limit)
        .limit(limit)
        .all(db)
        .await?;

    let donations = models
        .into_iter()
        .map(DonationView::try_from)
        .collect::<Result<Vec<_>>>()?;

    Ok(DonationPage { donations, total })
}

/// Lists approved food donations across all donors - the marketplace view.
pub async fn list_available_donations(db: &DatabaseConnection) -> Result<Vec<DonationView>> {
    let models = Donation::find()
        .filter(donation::Column::Status.eq(DonationStatus::Approved.as_str()))
        .filter(donation::Column::DonationType.eq("food"))
        .order_by_desc(donation::Column::CreatedAt)
        .all(db)
        .await?;

    models.into_iter().map(DonationView::try_from).collect()
}

/// Fetches a single owned donation.
pub async fn get_donation(db: &DatabaseConnection, user_id: &str, id: i64) -> Result<DonationView> {
    find_owned(db, user_id, id).await?.try_into()
}

/// Validates and persists a new donation for `user_id`.
pub async fn create_donation(
    db: &DatabaseConnection,
    user_id: &str,
    input: NewDonation,
) -> Result<DonationView> {
    let status = validate(&input)?;

    let now = chrono::Utc::now();
    let mut active = donation::ActiveModel {
        donor_id: Set(user_id.to_string()),
        status: Set(status.as_str().to_string()),
        recipient_id: Set(input.recipient_id),
        notes: Set(input.notes),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    apply_details(&mut active, input.details);

    active.insert(db).await?.try_into()
}

/// Replaces an owned donation wholesale.
pub async fn update_donation(
    db: &DatabaseConnection,
    user_id: &str,
    id: i64,
    input: NewDonation,
) -> Result<DonationView> {
    let existing = find_owned(db, user_id, id).await?;
    let status = validate(&input)?;

    let mut active: donation::ActiveModel = existing.into();
    active.status = Set(status.as_str().to_string());
    active.recipient_id = Set(input.recipient_id);
    active.notes = Set(input.notes);
    active.updated_at = Set(chrono::Utc::now());
    apply_details(&mut active, input.details);

    active.update(db).await?.try_into()
}

/// Deletes an owned donation.
pub async fn delete_donation(db: &DatabaseConnection, user_id: &str, id: i64) -> Result<()> {
    let model = find_owned(db, user_id, id).await?;
    model.delete(db).await?;
    Ok(())
}
