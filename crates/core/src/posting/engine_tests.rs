//! Engine tests against a stub context.

use chrono::{DateTime, Utc};
use munim_shared::types::{CreditorId, CustomerId, OwnerId, ProductId, PurchaseId, SaleId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::books::{
    Asset, ExpenseCategory, Liability, PaymentMethod, Purchase, Sale, SaleLine,
};
use crate::inventory::Product;
use crate::ledger::{Direction, LedgerEntry, LedgerKind};
use crate::party::{Creditor, Customer};

use super::context::PostingContext;
use super::engine::PostingEngine;
use super::error::PostingError;
use super::event::{
    CategoryTarget, FundingSource, PostingEvent, ProductTarget, SaleLineInput, SettleTarget,
};
use super::plan::{Collection, Delta, Document, WriteOp, WritePlan};

#[derive(Default)]
struct StubContext {
    cash: Decimal,
    bank: Decimal,
    products: Vec<Product>,
    creditors: Vec<Creditor>,
    customers: Vec<Customer>,
    purchases: Vec<Purchase>,
    sales: Vec<Sale>,
    assets: Vec<Asset>,
    liabilities: Vec<Liability>,
    categories: Vec<ExpenseCategory>,
    returned_purchases: Vec<(PurchaseId, i64)>,
    returned_sales: Vec<(SaleId, ProductId, i64)>,
}

impl PostingContext for StubContext {
    fn net_balance(&self, kind: LedgerKind) -> Decimal {
        match kind {
            LedgerKind::Cash => self.cash,
            LedgerKind::Bank => self.bank,
        }
    }

    fn product(&self, id: ProductId) -> Option<Product> {
        self.products.iter().find(|p| p.id == id).cloned()
    }

    fn product_by_name(&self, name: &str) -> Option<Product> {
        self.products
            .iter()
            .find(|p| p.product_name.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn creditor(&self, id: CreditorId) -> Option<Creditor> {
        self.creditors.iter().find(|c| c.id == id).cloned()
    }

    fn customer(&self, id: CustomerId) -> Option<Customer> {
        self.customers.iter().find(|c| c.id == id).cloned()
    }

    fn purchase(&self, id: PurchaseId) -> Option<Purchase> {
        self.purchases.iter().find(|p| p.id == id).cloned()
    }

    fn sale(&self, id: SaleId) -> Option<Sale> {
        self.sales.iter().find(|s| s.id == id).cloned()
    }

    fn asset(&self, id: munim_shared::types::AssetId) -> Option<Asset> {
        self.assets.iter().find(|a| a.id == id).cloned()
    }

    fn asset_by_name(&self, name: &str) -> Option<Asset> {
        self.assets
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn liability(&self, id: munim_shared::types::LiabilityId) -> Option<Liability> {
        self.liabilities.iter().find(|l| l.id == id).cloned()
    }

    fn category(&self, id: munim_shared::types::CategoryId) -> Option<ExpenseCategory> {
        self.categories.iter().find(|c| c.id == id).cloned()
    }

    fn category_by_name(&self, name: &str) -> Option<ExpenseCategory> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    fn quantity_returned_for_purchase(&self, id: PurchaseId) -> i64 {
        self.returned_purchases
            .iter()
            .filter(|(p, _)| *p == id)
            .map(|(_, q)| q)
            .sum()
    }

    fn quantity_returned_for_sale(&self, id: SaleId, product: ProductId) -> i64 {
        self.returned_sales
            .iter()
            .filter(|(s, p, _)| *s == id && *p == product)
            .map(|(_, _, q)| q)
            .sum()
    }
}

fn now() -> DateTime<Utc> {
    Utc::now()
}

fn post(
    owner: OwnerId,
    event: PostingEvent,
    ctx: &StubContext,
) -> Result<super::engine::Posting, PostingError> {
    PostingEngine::post(owner, event, now(), ctx)
}

// ============================================================================
// Plan inspection helpers
// ============================================================================

fn adjust_delta(plan: &WritePlan, collection: Collection, target: Uuid) -> Option<Delta> {
    plan.ops().iter().find_map(|op| match op {
        WriteOp::AdjustById {
            collection: c,
            id,
            delta,
        } if *c == collection && *id == target => Some(*delta),
        _ => None,
    })
}

fn inserted_entries(plan: &WritePlan) -> Vec<&LedgerEntry> {
    plan.ops()
        .iter()
        .filter_map(|op| match op {
            WriteOp::Insert(Document::LedgerEntry(entry)) => Some(entry),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Fixtures
// ============================================================================

fn product_fixture(owner: OwnerId, name: &str, stock: i64) -> Product {
    Product::new(owner, name, stock, dec!(10), dec!(14))
}

fn credit_purchase_fixture(owner: OwnerId, creditor: &Creditor, quantity: i64) -> Purchase {
    Purchase {
        id: PurchaseId::new(),
        owner,
        product_name: "soap".into(),
        payment: PaymentMethod::Credit,
        creditor: Some(creditor.into()),
        quantity,
        per_piece_cost: dec!(10),
        per_piece_selling_price: dec!(14),
        other_expenses: Decimal::ZERO,
        total_cost: Decimal::from(quantity) * dec!(10),
        date: now(),
    }
}

// ============================================================================
// Purchases
// ============================================================================

#[test]
fn credit_purchase_raises_due_and_stock_without_cash_entry() {
    let owner = OwnerId::new();
    let creditor = Creditor::new(owner, "Acme Traders", "0171", None);
    let product = product_fixture(owner, "soap", 10);
    let ctx = StubContext {
        creditors: vec![creditor.clone()],
        products: vec![product.clone()],
        ..Default::default()
    };

    let posting = post(
        owner,
        PostingEvent::Purchase {
            target: ProductTarget::Existing(product.id),
            quantity: 5,
            per_piece_cost: dec!(10),
            per_piece_selling_price: dec!(14),
            other_expenses: None,
            source: FundingSource::Credit(creditor.id),
        },
        &ctx,
    )
    .unwrap();

    let Document::Purchase(purchase) = &posting.document else {
        panic!("expected a purchase document");
    };
    assert_eq!(purchase.total_cost, dec!(50));
    assert_eq!(purchase.payment, PaymentMethod::Credit);
    assert_eq!(purchase.creditor.as_ref().unwrap().name, "Acme Traders");

    assert_eq!(
        adjust_delta(&posting.plan, Collection::Creditors, creditor.id.into_inner()),
        Some(Delta::Money(dec!(50)))
    );
    assert_eq!(
        adjust_delta(&posting.plan, Collection::Products, product.id.into_inner()),
        Some(Delta::Quantity(5))
    );
    assert!(inserted_entries(&posting.plan).is_empty());
}

#[test]
fn cash_purchase_requires_funds() {
    let owner = OwnerId::new();
    let product = product_fixture(owner, "soap", 10);
    let ctx = StubContext {
        cash: dec!(40),
        products: vec![product.clone()],
        ..Default::default()
    };

    let err = post(
        owner,
        PostingEvent::Purchase {
            target: ProductTarget::Existing(product.id),
            quantity: 5,
            per_piece_cost: dec!(10),
            per_piece_selling_price: dec!(14),
            other_expenses: None,
            source: FundingSource::Cash,
        },
        &ctx,
    )
    .unwrap_err();

    assert_eq!(
        err,
        PostingError::InsufficientFunds {
            source: LedgerKind::Cash,
            needed: dec!(50),
            available: dec!(40),
        }
    );
}

#[test]
fn cash_purchase_builds_credit_entry_for_total() {
    let owner = OwnerId::new();
    let product = product_fixture(owner, "soap", 10);
    let ctx = StubContext {
        cash: dec!(100),
        products: vec![product.clone()],
        ..Default::default()
    };

    let posting = post(
        owner,
        PostingEvent::Purchase {
            target: ProductTarget::Existing(product.id),
            quantity: 5,
            per_piece_cost: dec!(10),
            per_piece_selling_price: dec!(14),
            other_expenses: Some(dec!(7)),
            source: FundingSource::Cash,
        },
        &ctx,
    )
    .unwrap();

    let entries = inserted_entries(&posting.plan);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].direction, Direction::Credit);
    assert_eq!(entries[0].amount, dec!(57));
    assert_eq!(entries[0].kind, LedgerKind::Cash);
}

#[test]
fn new_product_purchase_inserts_product_with_opening_stock() {
    let owner = OwnerId::new();
    let ctx = StubContext {
        bank: dec!(500),
        ..Default::default()
    };

    let posting = post(
        owner,
        PostingEvent::Purchase {
            target: ProductTarget::New {
                name: "mustard oil".into(),
            },
            quantity: 20,
            per_piece_cost: dec!(9),
            per_piece_selling_price: dec!(12),
            other_expenses: None,
            source: FundingSource::Bank,
        },
        &ctx,
    )
    .unwrap();

    let inserted_product = posting.plan.ops().iter().find_map(|op| match op {
        WriteOp::Insert(Document::Product(p)) => Some(p),
        _ => None,
    });
    let product = inserted_product.expect("plan should insert the new product");
    assert_eq!(product.number_in_stock, 20);
    assert_eq!(product.product_name, "mustard oil");
}

#[test]
fn new_product_purchase_rejects_existing_name() {
    let owner = OwnerId::new();
    let ctx = StubContext {
        cash: dec!(500),
        products: vec![product_fixture(owner, "soap", 3)],
        ..Default::default()
    };

    let err = post(
        owner,
        PostingEvent::Purchase {
            target: ProductTarget::New {
                name: "Soap".into(),
            },
            quantity: 5,
            per_piece_cost: dec!(10),
            per_piece_selling_price: dec!(14),
            other_expenses: None,
            source: FundingSource::Cash,
        },
        &ctx,
    )
    .unwrap_err();

    assert_eq!(err, PostingError::DuplicateProduct("Soap".into()));
}

#[test]
fn purchase_of_foreign_product_is_not_owned() {
    let owner = OwnerId::new();
    let foreign = product_fixture(OwnerId::new(), "soap", 3);
    let ctx = StubContext {
        cash: dec!(500),
        products: vec![foreign.clone()],
        ..Default::default()
    };

    let err = post(
        owner,
        PostingEvent::Purchase {
            target: ProductTarget::Existing(foreign.id),
            quantity: 1,
            per_piece_cost: dec!(10),
            per_piece_selling_price: dec!(14),
            other_expenses: None,
            source: FundingSource::Cash,
        },
        &ctx,
    )
    .unwrap_err();

    assert_eq!(err, PostingError::NotOwned);
}

// ============================================================================
// Sales
// ============================================================================

#[test]
fn sale_rejects_insufficient_stock() {
    let owner = OwnerId::new();
    let product = product_fixture(owner, "soap", 3);
    let ctx = StubContext {
        products: vec![product.clone()],
        ..Default::default()
    };

    let err = post(
        owner,
        PostingEvent::Sale {
            lines: vec![SaleLineInput {
                product_id: product.id,
                quantity: 5,
                unit_price: dec!(14),
            }],
            customer: None,
            payment: PaymentMethod::Cash,
            other_expenses: None,
        },
        &ctx,
    )
    .unwrap_err();

    assert_eq!(
        err,
        PostingError::InsufficientStock {
            product: product.id,
            requested: 5,
            in_stock: 3,
        }
    );
}

#[test]
fn sale_lines_of_one_product_count_together() {
    let owner = OwnerId::new();
    let product = product_fixture(owner, "soap", 5);
    let ctx = StubContext {
        products: vec![product.clone()],
        ..Default::default()
    };

    let line = |quantity| SaleLineInput {
        product_id: product.id,
        quantity,
        unit_price: dec!(14),
    };
    let err = post(
        owner,
        PostingEvent::Sale {
            lines: vec![line(3), line(3)],
            customer: None,
            payment: PaymentMethod::Cash,
            other_expenses: None,
        },
        &ctx,
    )
    .unwrap_err();

    assert_eq!(
        err,
        PostingError::InsufficientStock {
            product: product.id,
            requested: 6,
            in_stock: 5,
        }
    );
}

#[test]
fn sale_computes_total_and_decrements_stock() {
    let owner = OwnerId::new();
    let soap = product_fixture(owner, "soap", 10);
    let oil = product_fixture(owner, "oil", 4);
    let customer = Customer::new(owner, "Rahim", "0172", None);
    let ctx = StubContext {
        products: vec![soap.clone(), oil.clone()],
        customers: vec![customer.clone()],
        ..Default::default()
    };

    let posting = post(
        owner,
        PostingEvent::Sale {
            lines: vec![
                SaleLineInput {
                    product_id: soap.id,
                    quantity: 2,
                    unit_price: dec!(14),
                },
                SaleLineInput {
                    product_id: oil.id,
                    quantity: 3,
                    unit_price: dec!(90),
                },
            ],
            customer: Some(customer.id),
            payment: PaymentMethod::Credit,
            other_expenses: Some(dec!(2)),
        },
        &ctx,
    )
    .unwrap();

    let Document::Sale(sale) = &posting.document else {
        panic!("expected a sale document");
    };
    // 2*14 + 3*90 + 2 = 300
    assert_eq!(sale.total_amount, dec!(300));
    assert_eq!(sale.customer.as_ref().unwrap().name, "Rahim");

    assert_eq!(
        adjust_delta(&posting.plan, Collection::Products, soap.id.into_inner()),
        Some(Delta::Quantity(-2))
    );
    assert_eq!(
        adjust_delta(&posting.plan, Collection::Products, oil.id.into_inner()),
        Some(Delta::Quantity(-3))
    );
    // A sale never writes a ledger entry.
    assert!(inserted_entries(&posting.plan).is_empty());
    // Credit sales do not raise the customer's due.
    assert_eq!(
        adjust_delta(&posting.plan, Collection::Customers, customer.id.into_inner()),
        None
    );
}

// ============================================================================
// Returns
// ============================================================================

#[test]
fn purchase_return_is_bounded_by_remaining_quantity() {
    let owner = OwnerId::new();
    let creditor = Creditor::new(owner, "Acme Traders", "0171", None);
    let purchase = credit_purchase_fixture(owner, &creditor, 10);
    let product = product_fixture(owner, "soap", 10);
    let ctx = StubContext {
        creditors: vec![creditor],
        purchases: vec![purchase.clone()],
        products: vec![product.clone()],
        returned_purchases: vec![(purchase.id, 4)],
        ..Default::default()
    };

    let event = |quantity| PostingEvent::ReturnPurchase {
        purchase: purchase.id,
        product: product.id,
        quantity,
        per_piece_cost: dec!(10),
    };

    let err = post(owner, event(7), &ctx).unwrap_err();
    assert_eq!(
        err,
        PostingError::ExceedsOriginal {
            requested: 7,
            returnable: 6,
        }
    );

    let posting = post(owner, event(6), &ctx).unwrap();
    assert_eq!(
        adjust_delta(&posting.plan, Collection::Products, product.id.into_inner()),
        Some(Delta::Quantity(-6))
    );
}

#[test]
fn credit_purchase_return_lowers_creditor_due() {
    let owner = OwnerId::new();
    let creditor = Creditor::new(owner, "Acme Traders", "0171", Some(dec!(100)));
    let purchase = credit_purchase_fixture(owner, &creditor, 10);
    let product = product_fixture(owner, "soap", 10);
    let ctx = StubContext {
        creditors: vec![creditor.clone()],
        purchases: vec![purchase.clone()],
        products: vec![product.clone()],
        ..Default::default()
    };

    let posting = post(
        owner,
        PostingEvent::ReturnPurchase {
            purchase: purchase.id,
            product: product.id,
            quantity: 3,
            per_piece_cost: dec!(10),
        },
        &ctx,
    )
    .unwrap();

    assert_eq!(
        adjust_delta(&posting.plan, Collection::Creditors, creditor.id.into_inner()),
        Some(Delta::Money(dec!(-30)))
    );
    // The return embeds the purchase as it was.
    let Document::PurchaseReturn(purchase_return) = &posting.document else {
        panic!("expected a purchase return");
    };
    assert_eq!(purchase_return.purchase.id, purchase.id);
    assert_eq!(purchase_return.total_amount, dec!(30));
}

#[test]
fn cash_purchase_return_leaves_dues_alone() {
    let owner = OwnerId::new();
    let product = product_fixture(owner, "soap", 10);
    let purchase = Purchase {
        id: PurchaseId::new(),
        owner,
        product_name: "soap".into(),
        payment: PaymentMethod::Cash,
        creditor: None,
        quantity: 10,
        per_piece_cost: dec!(10),
        per_piece_selling_price: dec!(14),
        other_expenses: Decimal::ZERO,
        total_cost: dec!(100),
        date: now(),
    };
    let ctx = StubContext {
        purchases: vec![purchase.clone()],
        products: vec![product.clone()],
        ..Default::default()
    };

    let posting = post(
        owner,
        PostingEvent::ReturnPurchase {
            purchase: purchase.id,
            product: product.id,
            quantity: 2,
            per_piece_cost: dec!(10),
        },
        &ctx,
    )
    .unwrap();

    let creditor_ops = posting
        .plan
        .ops()
        .iter()
        .filter(|op| {
            matches!(
                op,
                WriteOp::AdjustById {
                    collection: Collection::Creditors,
                    ..
                }
            )
        })
        .count();
    assert_eq!(creditor_ops, 0);
}

#[test]
fn sales_return_restores_stock_and_is_bounded() {
    let owner = OwnerId::new();
    let product = product_fixture(owner, "soap", 2);
    let sale = Sale {
        id: SaleId::new(),
        owner,
        payment: PaymentMethod::Cash,
        customer: None,
        lines: vec![SaleLine {
            product_id: product.id,
            product_name: "soap".into(),
            quantity: 5,
            unit_price: dec!(14),
        }],
        other_expenses: Decimal::ZERO,
        total_amount: dec!(70),
        date: now(),
    };
    let ctx = StubContext {
        products: vec![product.clone()],
        sales: vec![sale.clone()],
        returned_sales: vec![(sale.id, product.id, 2)],
        ..Default::default()
    };

    let event = |quantity| PostingEvent::ReturnSale {
        sale: sale.id,
        product: product.id,
        quantity,
        unit_price: dec!(14),
    };

    let err = post(owner, event(4), &ctx).unwrap_err();
    assert_eq!(
        err,
        PostingError::ExceedsOriginal {
            requested: 4,
            returnable: 3,
        }
    );

    let posting = post(owner, event(3), &ctx).unwrap();
    assert_eq!(
        adjust_delta(&posting.plan, Collection::Products, product.id.into_inner()),
        Some(Delta::Quantity(3))
    );
}

#[test]
fn return_against_missing_purchase_is_not_found() {
    let owner = OwnerId::new();
    let product = product_fixture(owner, "soap", 10);
    let ctx = StubContext {
        products: vec![product.clone()],
        ..Default::default()
    };

    let missing = PurchaseId::new();
    let err = post(
        owner,
        PostingEvent::ReturnPurchase {
            purchase: missing,
            product: product.id,
            quantity: 1,
            per_piece_cost: dec!(10),
        },
        &ctx,
    )
    .unwrap_err();

    assert_eq!(err, PostingError::PurchaseNotFound(missing));
}

// ============================================================================
// Assets and liabilities
// ============================================================================

#[test]
fn acquire_asset_on_credit_raises_due() {
    let owner = OwnerId::new();
    let creditor = Creditor::new(owner, "Acme Traders", "0171", None);
    let ctx = StubContext {
        creditors: vec![creditor.clone()],
        ..Default::default()
    };

    let posting = post(
        owner,
        PostingEvent::AcquireAsset {
            name: "delivery van".into(),
            amount: dec!(5000),
            other_expenses: Some(dec!(200)),
            source: FundingSource::Credit(creditor.id),
        },
        &ctx,
    )
    .unwrap();

    assert_eq!(
        adjust_delta(&posting.plan, Collection::Creditors, creditor.id.into_inner()),
        Some(Delta::Money(dec!(5000)))
    );
    assert!(inserted_entries(&posting.plan).is_empty());
}

#[test]
fn acquire_asset_for_cash_checks_funds_including_expenses() {
    let owner = OwnerId::new();
    let ctx = StubContext {
        cash: dec!(5100),
        ..Default::default()
    };

    let err = post(
        owner,
        PostingEvent::AcquireAsset {
            name: "delivery van".into(),
            amount: dec!(5000),
            other_expenses: Some(dec!(200)),
            source: FundingSource::Cash,
        },
        &ctx,
    )
    .unwrap_err();

    assert_eq!(
        err,
        PostingError::InsufficientFunds {
            source: LedgerKind::Cash,
            needed: dec!(5200),
            available: dec!(5100),
        }
    );
}

#[test]
fn duplicate_asset_name_is_rejected() {
    let owner = OwnerId::new();
    let existing = Asset::new(owner, "delivery van", dec!(5000), Decimal::ZERO, now());
    let ctx = StubContext {
        cash: dec!(9000),
        assets: vec![existing],
        ..Default::default()
    };

    let err = post(
        owner,
        PostingEvent::AcquireAsset {
            name: "Delivery Van".into(),
            amount: dec!(100),
            other_expenses: None,
            source: FundingSource::Cash,
        },
        &ctx,
    )
    .unwrap_err();

    assert_eq!(err, PostingError::DuplicateAsset("Delivery Van".into()));
}

#[test]
fn liability_draw_down_adds_interest_and_debits_ledger() {
    let owner = OwnerId::new();
    let ctx = StubContext::default();

    let posting = post(
        owner,
        PostingEvent::DrawDownLiability {
            name: "bank loan".into(),
            principal: dec!(1200),
            interest_rate: dec!(10),
            term_months: 12,
            other_expenses: None,
            source: LedgerKind::Bank,
        },
        &ctx,
    )
    .unwrap();

    let Document::Liability(liability) = &posting.document else {
        panic!("expected a liability document");
    };
    // 1200 * 10 * 1 / 100 = 120 interest
    assert_eq!(liability.amount, dec!(1320));

    let entries = inserted_entries(&posting.plan);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].direction, Direction::Debit);
    assert_eq!(entries[0].amount, dec!(1200));
    assert_eq!(entries[0].kind, LedgerKind::Bank);
}

#[test]
fn settle_liability_is_bounded_by_outstanding() {
    let owner = OwnerId::new();
    let liability = Liability {
        id: munim_shared::types::LiabilityId::new(),
        owner,
        name: "bank loan".into(),
        amount: dec!(300),
        interest_rate: dec!(10),
        term_months: 12,
        other_expenses: Decimal::ZERO,
        date: now(),
    };
    let ctx = StubContext {
        cash: dec!(1000),
        liabilities: vec![liability.clone()],
        ..Default::default()
    };

    let err = post(
        owner,
        PostingEvent::Settle {
            target: SettleTarget::Liability(liability.id),
            amount: dec!(400),
            source: LedgerKind::Cash,
        },
        &ctx,
    )
    .unwrap_err();
    assert_eq!(
        err,
        PostingError::AmountExceedsBalance {
            requested: dec!(400),
            outstanding: dec!(300),
        }
    );

    let posting = post(
        owner,
        PostingEvent::Settle {
            target: SettleTarget::Liability(liability.id),
            amount: dec!(200),
            source: LedgerKind::Cash,
        },
        &ctx,
    )
    .unwrap();
    assert_eq!(
        adjust_delta(&posting.plan, Collection::Liabilities, liability.id.into_inner()),
        Some(Delta::Money(dec!(-200)))
    );
    let entries = inserted_entries(&posting.plan);
    assert_eq!(entries[0].direction, Direction::Credit);
    assert_eq!(entries[0].amount, dec!(200));
}

#[test]
fn settle_requires_funding_source_sufficiency() {
    let owner = OwnerId::new();
    let liability = Liability {
        id: munim_shared::types::LiabilityId::new(),
        owner,
        name: "bank loan".into(),
        amount: dec!(300),
        interest_rate: dec!(10),
        term_months: 12,
        other_expenses: Decimal::ZERO,
        date: now(),
    };
    let ctx = StubContext {
        cash: dec!(50),
        liabilities: vec![liability.clone()],
        ..Default::default()
    };

    let err = post(
        owner,
        PostingEvent::Settle {
            target: SettleTarget::Liability(liability.id),
            amount: dec!(100),
            source: LedgerKind::Cash,
        },
        &ctx,
    )
    .unwrap_err();

    assert!(matches!(err, PostingError::InsufficientFunds { .. }));
}

// ============================================================================
// Payments
// ============================================================================

#[test]
fn payment_given_credits_ledger_and_lowers_due() {
    let owner = OwnerId::new();
    let creditor = Creditor::new(owner, "Acme Traders", "0171", Some(dec!(80)));
    let ctx = StubContext {
        cash: dec!(100),
        creditors: vec![creditor.clone()],
        ..Default::default()
    };

    let posting = post(
        owner,
        PostingEvent::PaymentGiven {
            creditor: creditor.id,
            amount: dec!(30),
            source: LedgerKind::Cash,
        },
        &ctx,
    )
    .unwrap();

    let entries = inserted_entries(&posting.plan);
    assert_eq!(entries[0].direction, Direction::Credit);
    assert_eq!(entries[0].source, "Acme Traders");
    assert_eq!(
        adjust_delta(&posting.plan, Collection::Creditors, creditor.id.into_inner()),
        Some(Delta::Money(dec!(-30)))
    );

    let Document::Creditor(updated) = &posting.document else {
        panic!("expected the updated creditor");
    };
    assert_eq!(updated.due, dec!(50));
}

#[test]
fn payment_given_requires_funds() {
    let owner = OwnerId::new();
    let creditor = Creditor::new(owner, "Acme Traders", "0171", Some(dec!(80)));
    let ctx = StubContext {
        cash: dec!(10),
        creditors: vec![creditor.clone()],
        ..Default::default()
    };

    let err = post(
        owner,
        PostingEvent::PaymentGiven {
            creditor: creditor.id,
            amount: dec!(30),
            source: LedgerKind::Cash,
        },
        &ctx,
    )
    .unwrap_err();

    assert!(matches!(err, PostingError::InsufficientFunds { .. }));
}

#[test]
fn payment_received_needs_no_funds_and_debits_ledger() {
    let owner = OwnerId::new();
    let customer = Customer::new(owner, "Rahim", "0172", Some(dec!(60)));
    let ctx = StubContext {
        customers: vec![customer.clone()],
        ..Default::default()
    };

    let posting = post(
        owner,
        PostingEvent::PaymentReceived {
            customer: customer.id,
            amount: dec!(25),
            target: LedgerKind::Cash,
        },
        &ctx,
    )
    .unwrap();

    let entries = inserted_entries(&posting.plan);
    assert_eq!(entries[0].direction, Direction::Debit);
    assert_eq!(
        adjust_delta(&posting.plan, Collection::Customers, customer.id.into_inner()),
        Some(Delta::Money(dec!(-25)))
    );
}

#[test]
fn payment_to_foreign_creditor_is_not_owned() {
    let owner = OwnerId::new();
    let foreign = Creditor::new(OwnerId::new(), "Acme Traders", "0171", None);
    let ctx = StubContext {
        cash: dec!(100),
        creditors: vec![foreign.clone()],
        ..Default::default()
    };

    let err = post(
        owner,
        PostingEvent::PaymentGiven {
            creditor: foreign.id,
            amount: dec!(30),
            source: LedgerKind::Cash,
        },
        &ctx,
    )
    .unwrap_err();

    assert_eq!(err, PostingError::NotOwned);
}

// ============================================================================
// Expenses and drawings
// ============================================================================

#[test]
fn expense_with_new_category_creates_it() {
    let owner = OwnerId::new();
    let ctx = StubContext {
        cash: dec!(100),
        ..Default::default()
    };

    let posting = post(
        owner,
        PostingEvent::Expense {
            name: "electricity".into(),
            amount: dec!(40),
            category: Some(CategoryTarget::New {
                name: "utilities".into(),
            }),
            source: LedgerKind::Cash,
        },
        &ctx,
    )
    .unwrap();

    let category_inserts = posting
        .plan
        .ops()
        .iter()
        .filter(|op| matches!(op, WriteOp::Insert(Document::ExpenseCategory(_))))
        .count();
    assert_eq!(category_inserts, 1);

    let Document::Expense(expense) = &posting.document else {
        panic!("expected an expense document");
    };
    assert_eq!(expense.category.as_deref(), Some("utilities"));

    let entries = inserted_entries(&posting.plan);
    assert_eq!(entries[0].direction, Direction::Credit);
    assert_eq!(entries[0].amount, dec!(40));
}

#[test]
fn expense_reuses_existing_category_by_name() {
    let owner = OwnerId::new();
    let existing = ExpenseCategory::new(owner, "utilities");
    let ctx = StubContext {
        cash: dec!(100),
        categories: vec![existing],
        ..Default::default()
    };

    let posting = post(
        owner,
        PostingEvent::Expense {
            name: "electricity".into(),
            amount: dec!(40),
            category: Some(CategoryTarget::New {
                name: "Utilities".into(),
            }),
            source: LedgerKind::Cash,
        },
        &ctx,
    )
    .unwrap();

    let category_inserts = posting
        .plan
        .ops()
        .iter()
        .filter(|op| matches!(op, WriteOp::Insert(Document::ExpenseCategory(_))))
        .count();
    assert_eq!(category_inserts, 0);
}

#[test]
fn expense_requires_funds() {
    let owner = OwnerId::new();
    let ctx = StubContext {
        cash: dec!(10),
        ..Default::default()
    };

    let err = post(
        owner,
        PostingEvent::Expense {
            name: "electricity".into(),
            amount: dec!(40),
            category: None,
            source: LedgerKind::Cash,
        },
        &ctx,
    )
    .unwrap_err();

    assert!(matches!(err, PostingError::InsufficientFunds { .. }));
}

#[test]
fn cash_drawing_credits_cash() {
    let owner = OwnerId::new();
    let ctx = StubContext {
        cash: dec!(100),
        ..Default::default()
    };

    let posting = post(owner, PostingEvent::DrawCash { amount: dec!(60) }, &ctx).unwrap();

    let entries = inserted_entries(&posting.plan);
    assert_eq!(entries[0].direction, Direction::Credit);
    assert_eq!(entries[0].amount, dec!(60));
    assert_eq!(entries[0].source, "drawings");
}

#[test]
fn stock_drawing_values_lines_and_decrements_stock() {
    let owner = OwnerId::new();
    let product = product_fixture(owner, "soap", 10);
    let ctx = StubContext {
        products: vec![product.clone()],
        ..Default::default()
    };

    let posting = post(
        owner,
        PostingEvent::DrawStock {
            lines: vec![SaleLineInput {
                product_id: product.id,
                quantity: 4,
                unit_price: dec!(14),
            }],
        },
        &ctx,
    )
    .unwrap();

    let Document::Drawing(drawing) = &posting.document else {
        panic!("expected a drawing document");
    };
    assert_eq!(drawing.amount, dec!(56));
    assert_eq!(
        adjust_delta(&posting.plan, Collection::Products, product.id.into_inner()),
        Some(Delta::Quantity(-4))
    );
}

// ============================================================================
// Validation short-circuits
// ============================================================================

#[test]
fn zero_amounts_are_rejected_before_any_lookup() {
    let owner = OwnerId::new();
    let ctx = StubContext::default();

    let err = post(
        owner,
        PostingEvent::DrawCash {
            amount: Decimal::ZERO,
        },
        &ctx,
    )
    .unwrap_err();
    assert!(matches!(err, PostingError::Validation(_)));

    let err = post(
        owner,
        PostingEvent::AcquireAsset {
            name: "  ".into(),
            amount: dec!(10),
            other_expenses: None,
            source: FundingSource::Cash,
        },
        &ctx,
    )
    .unwrap_err();
    assert!(matches!(err, PostingError::Validation(_)));
}
