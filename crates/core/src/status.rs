//! Status enums and the transitions between them.
//!
//! All statuses are stored as TEXT in the database and travel as their
//! SCREAMING_SNAKE_CASE form over the wire, so each enum carries an
//! `as_str` and a fallible `TryFrom<String>`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Project lifecycle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    UnderReview,
    WaitingForQuote,
    QuotedAwaitingCustomer,
    OrderStarted,
    OrderFinalized,
    ProjectCompleted,
    Rejected,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::UnderReview => "UNDER_REVIEW",
            ProjectStatus::WaitingForQuote => "WAITING_FOR_QUOTE",
            ProjectStatus::QuotedAwaitingCustomer => "QUOTED_AWAITING_CUSTOMER",
            ProjectStatus::OrderStarted => "ORDER_STARTED",
            ProjectStatus::OrderFinalized => "ORDER_FINALIZED",
            ProjectStatus::ProjectCompleted => "PROJECT_COMPLETED",
            ProjectStatus::Rejected => "REJECTED",
        }
    }

    /// A project may be deleted by its owner only while it has not yet
    /// turned into an order.
    pub fn is_cancellable(&self) -> bool {
        matches!(
            self,
            ProjectStatus::UnderReview
                | ProjectStatus::WaitingForQuote
                | ProjectStatus::QuotedAwaitingCustomer
        )
    }

    /// Statuses from which an admin may attach a final quote.
    pub fn accepts_quote(&self) -> bool {
        matches!(
            self,
            ProjectStatus::UnderReview | ProjectStatus::WaitingForQuote
        )
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "UNDER_REVIEW" => Ok(ProjectStatus::UnderReview),
            "WAITING_FOR_QUOTE" => Ok(ProjectStatus::WaitingForQuote),
            "QUOTED_AWAITING_CUSTOMER" => Ok(ProjectStatus::QuotedAwaitingCustomer),
            "ORDER_STARTED" => Ok(ProjectStatus::OrderStarted),
            "ORDER_FINALIZED" => Ok(ProjectStatus::OrderFinalized),
            "PROJECT_COMPLETED" => Ok(ProjectStatus::ProjectCompleted),
            "REJECTED" => Ok(ProjectStatus::Rejected),
            other => Err(CoreError::Validation(format!(
                "unknown project status '{other}'"
            ))),
        }
    }
}

/// Outcome of the initial admin review of a submitted project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminDecision {
    Accept,
    Reject,
}

impl AdminDecision {
    /// Resolve the decision against the project's current status. Review
    /// decisions are only legal while the project is still under review.
    pub fn resolve(&self, current: ProjectStatus) -> Result<ProjectStatus, CoreError> {
        if current != ProjectStatus::UnderReview {
            return Err(CoreError::StateConflict {
                entity: "project",
                current: current.as_str().to_string(),
            });
        }
        Ok(match self {
            AdminDecision::Accept => ProjectStatus::WaitingForQuote,
            AdminDecision::Reject => ProjectStatus::Rejected,
        })
    }
}

// ---------------------------------------------------------------------------
// Orders and payment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Draft,
    OrderCreated,
    OrderFinalized,
    Paid,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "DRAFT",
            OrderStatus::OrderCreated => "ORDER_CREATED",
            OrderStatus::OrderFinalized => "ORDER_FINALIZED",
            OrderStatus::Paid => "PAID",
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "DRAFT" => Ok(OrderStatus::Draft),
            "ORDER_CREATED" => Ok(OrderStatus::OrderCreated),
            "ORDER_FINALIZED" => Ok(OrderStatus::OrderFinalized),
            "PAID" => Ok(OrderStatus::Paid),
            other => Err(CoreError::Validation(format!(
                "unknown order status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    PendingPayment,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::PendingPayment => "PENDING_PAYMENT",
            PaymentStatus::Paid => "PAID",
        }
    }

    /// An order marked PAID must always carry a PAID payment status.
    pub fn for_order(order_status: OrderStatus, requested: PaymentStatus) -> PaymentStatus {
        if order_status == OrderStatus::Paid {
            PaymentStatus::Paid
        } else {
            requested
        }
    }
}

impl TryFrom<String> for PaymentStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "PENDING_PAYMENT" => Ok(PaymentStatus::PendingPayment),
            "PAID" => Ok(PaymentStatus::Paid),
            other => Err(CoreError::Validation(format!(
                "unknown payment status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    PureFdm,
    ComplexAssembly,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::PureFdm => "PURE_FDM",
            OrderType::ComplexAssembly => "COMPLEX_ASSEMBLY",
        }
    }

    /// Any special-processing flag on the submission form promotes the
    /// order from a plain print run to an assembly.
    pub fn from_flags(needs_special_processing: bool) -> OrderType {
        if needs_special_processing {
            OrderType::ComplexAssembly
        } else {
            OrderType::PureFdm
        }
    }
}

impl TryFrom<String> for OrderType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "PURE_FDM" => Ok(OrderType::PureFdm),
            "COMPLEX_ASSEMBLY" => Ok(OrderType::ComplexAssembly),
            other => Err(CoreError::Validation(format!(
                "unknown order type '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Manufacturing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlueprintStatus {
    Initialized,
    BomFinished,
    Completed,
}

impl BlueprintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlueprintStatus::Initialized => "INITIALIZED",
            BlueprintStatus::BomFinished => "BOM_FINISHED",
            BlueprintStatus::Completed => "COMPLETED",
        }
    }
}

impl TryFrom<String> for BlueprintStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "INITIALIZED" => Ok(BlueprintStatus::Initialized),
            "BOM_FINISHED" => Ok(BlueprintStatus::BomFinished),
            "COMPLETED" => Ok(BlueprintStatus::Completed),
            other => Err(CoreError::Validation(format!(
                "unknown blueprint status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Queued,
    Printing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "QUEUED",
            JobStatus::Printing => "PRINTING",
            JobStatus::Completed => "COMPLETED",
            JobStatus::Failed => "FAILED",
        }
    }
}

impl TryFrom<String> for JobStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "QUEUED" => Ok(JobStatus::Queued),
            "PRINTING" => Ok(JobStatus::Printing),
            "COMPLETED" => Ok(JobStatus::Completed),
            "FAILED" => Ok(JobStatus::Failed),
            other => Err(CoreError::Validation(format!("unknown job status '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Messaging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SenderRole {
    Admin,
    User,
}

impl SenderRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SenderRole::Admin => "ADMIN",
            SenderRole::User => "USER",
        }
    }
}

impl TryFrom<String> for SenderRole {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "ADMIN" => Ok(SenderRole::Admin),
            "USER" => Ok(SenderRole::User),
            other => Err(CoreError::Validation(format!(
                "unknown sender role '{other}'"
            ))),
        }
    }
}
