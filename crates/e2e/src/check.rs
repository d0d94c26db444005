//! Record checks run after the purchase form has been submitted
//!
//! All checks of a scenario are evaluated before the scenario is judged, so a
//! failing status check still reports whether the order row correlates.

use serde::{Deserialize, Serialize};
use travelpay_common::{
    CardStatus, CreditRequestEntity, OrderEntity, PaymentEntity, PurchaseKind, SqlHelper, Table,
};

use crate::error::E2eResult;
use crate::scenario::Expectation;

/// Outcome of a single named assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckResult {
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            detail: None,
        }
    }

    pub fn fail(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            detail: Some(detail.into()),
        }
    }

    /// Equality check with an assert_eq-style message on mismatch
    pub fn equals<T>(name: impl Into<String>, expected: T, actual: T) -> Self
    where
        T: PartialEq + std::fmt::Debug,
    {
        if expected == actual {
            Self::pass(name)
        } else {
            Self::fail(name, format!("expected {:?}, got {:?}", expected, actual))
        }
    }
}

/// Rows present after a purchase attempt
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSnapshot {
    pub payment: Option<PaymentEntity>,
    pub credit: Option<CreditRequestEntity>,
    pub order: Option<OrderEntity>,
    pub payment_count: i64,
    pub credit_count: i64,
    pub order_count: i64,
}

impl RecordSnapshot {
    pub async fn read(sql: &SqlHelper) -> E2eResult<Self> {
        Ok(Self {
            payment: sql.payment_entity().await?,
            credit: sql.credit_request_entity().await?,
            order: sql.order_entity().await?,
            payment_count: sql.count(Table::Payment).await?,
            credit_count: sql.count(Table::CreditRequest).await?,
            order_count: sql.count(Table::Order).await?,
        })
    }

    fn record_count(&self, kind: PurchaseKind) -> i64 {
        match kind {
            PurchaseKind::Debit => self.payment_count,
            PurchaseKind::Credit => self.credit_count,
        }
    }

    fn record_status(&self, kind: PurchaseKind) -> Option<&str> {
        match kind {
            PurchaseKind::Debit => self.payment.as_ref().map(|p| p.status.as_str()),
            PurchaseKind::Credit => self.credit.as_ref().map(|c| c.status.as_str()),
        }
    }

    fn has_record(&self, kind: PurchaseKind) -> bool {
        match kind {
            PurchaseKind::Debit => self.payment.is_some(),
            PurchaseKind::Credit => self.credit.is_some(),
        }
    }
}

/// Whether the expectation needs the database at all
pub fn needs_records(expectation: &Expectation) -> bool {
    !matches!(expectation, Expectation::FieldMessages(_))
}

/// Evaluate the database side of an expectation
///
/// `price_in_kops` is the tour price read from the page before buying; only
/// approved debit payments are compared against it.
pub fn evaluate_records(
    kind: PurchaseKind,
    expectation: &Expectation,
    records: &RecordSnapshot,
    price_in_kops: Option<i64>,
) -> Vec<CheckResult> {
    let table = kind.record_table();
    match expectation {
        Expectation::Approved => match kind {
            PurchaseKind::Debit => approved_debit(records, price_in_kops),
            PurchaseKind::Credit => approved_credit(records),
        },
        Expectation::Declined => vec![CheckResult::equals(
            format!("{}.status", table),
            Some(CardStatus::Declined.as_str()),
            records.record_status(kind),
        )],
        Expectation::Rejected => {
            let mut checks = Vec::with_capacity(2);
            checks.push(if records.order.is_none() {
                CheckResult::pass("order_entity.empty")
            } else {
                CheckResult::fail("order_entity.empty", "order_entity is not empty")
            });
            let name = format!("{}.empty", table);
            checks.push(if records.has_record(kind) {
                CheckResult::fail(name, format!("{} is not empty", table))
            } else {
                CheckResult::pass(name)
            });
            checks
        }
        Expectation::FieldMessages(_) => Vec::new(),
    }
}

fn approved_debit(records: &RecordSnapshot, price_in_kops: Option<i64>) -> Vec<CheckResult> {
    let mut checks = Vec::new();

    let Some(payment) = &records.payment else {
        checks.push(CheckResult::fail("payment_entity.present", "no payment_entity row"));
        return checks;
    };

    checks.push(CheckResult::equals(
        "payment_entity.status",
        CardStatus::Approved.as_str(),
        payment.status.as_str(),
    ));
    checks.push(match price_in_kops {
        Some(price) => CheckResult::equals("payment_entity.amount", price, payment.amount),
        None => CheckResult::fail("payment_entity.amount", "tour price was not read from the page"),
    });
    checks.push(CheckResult::equals(
        "order_entity.payment_id",
        payment.transaction_id.as_deref(),
        records.order.as_ref().and_then(|o| o.payment_id.as_deref()),
    ));
    checks.extend(single_rows(records, PurchaseKind::Debit));
    checks
}

fn approved_credit(records: &RecordSnapshot) -> Vec<CheckResult> {
    let mut checks = Vec::new();

    let Some(credit) = &records.credit else {
        checks.push(CheckResult::fail(
            "credit_request_entity.present",
            "no credit_request_entity row",
        ));
        return checks;
    };

    let order = records.order.as_ref();
    checks.push(CheckResult::equals(
        "credit_request_entity.status",
        CardStatus::Approved.as_str(),
        credit.status.as_str(),
    ));
    checks.push(CheckResult::equals(
        "order_entity.payment_id",
        credit.bank_id.as_deref(),
        order.and_then(|o| o.payment_id.as_deref()),
    ));
    checks.push(CheckResult::equals(
        "order_entity.credit_id",
        Some(credit.id.as_str()),
        order.and_then(|o| o.credit_id.as_deref()),
    ));
    checks.extend(single_rows(records, PurchaseKind::Credit));
    checks
}

fn single_rows(records: &RecordSnapshot, kind: PurchaseKind) -> [CheckResult; 2] {
    [
        CheckResult::equals(
            format!("{}.count", kind.record_table()),
            1,
            records.record_count(kind),
        ),
        CheckResult::equals("order_entity.count", 1, records.order_count),
    ]
}
