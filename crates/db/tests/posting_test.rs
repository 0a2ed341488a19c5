//! End-to-end posting scenarios against the store.

use std::sync::Arc;

use munim_core::books::PaymentMethod;
use munim_core::ledger::{Direction, LedgerKind};
use munim_core::posting::{
    Document, FundingSource, PostingError, PostingEvent, ProductTarget, SaleLineInput,
    SettleTarget, WritePlan,
};
use munim_db::{
    BooksRepository, CreditorRepository, CustomerRepository, LedgerRepository, PostError,
    PostingService, ProductRepository, Store,
};
use munim_shared::types::OwnerId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

struct Fixture {
    store: Arc<Store>,
    service: PostingService,
    ledger: LedgerRepository,
    products: ProductRepository,
    creditors: CreditorRepository,
    customers: CustomerRepository,
    books: BooksRepository,
    owner: OwnerId,
}

impl Fixture {
    fn new() -> Self {
        let store = Arc::new(Store::new());
        Self {
            service: PostingService::new(store.clone()),
            ledger: LedgerRepository::new(store.clone()),
            products: ProductRepository::new(store.clone()),
            creditors: CreditorRepository::new(store.clone()),
            customers: CustomerRepository::new(store.clone()),
            books: BooksRepository::new(store.clone()),
            owner: OwnerId::new(),
            store,
        }
    }

    fn seed_cash(&self, amount: Decimal) {
        self.ledger.record(
            self.owner,
            LedgerKind::Cash,
            "opening balance",
            Direction::Debit,
            amount,
            None,
        );
    }

    fn cash_net(&self) -> Decimal {
        self.ledger.net_position(self.owner, LedgerKind::Cash).net()
    }
}

// ============================================================================
// Scenario: credit purchase
// ============================================================================

#[test]
fn credit_purchase_updates_due_stock_and_skips_cash() {
    let fx = Fixture::new();
    let creditor = fx.creditors.create(fx.owner, "Acme Traders", "0171", None);
    let product = fx.products.create(fx.owner, "soap", 0, dec!(10), dec!(14));

    let document = fx
        .service
        .post(
            fx.owner,
            PostingEvent::Purchase {
                target: ProductTarget::Existing(product.id),
                quantity: 5,
                per_piece_cost: dec!(10),
                per_piece_selling_price: dec!(14),
                other_expenses: None,
                source: FundingSource::Credit(creditor.id),
            },
        )
        .unwrap();

    let Document::Purchase(purchase) = document else {
        panic!("expected a purchase");
    };
    assert_eq!(purchase.total_cost, dec!(50));

    assert_eq!(fx.creditors.get(fx.owner, creditor.id).unwrap().due, dec!(50));
    assert_eq!(fx.products.get(fx.owner, product.id).unwrap().number_in_stock, 5);
    assert!(fx.ledger.list(fx.owner, LedgerKind::Cash).is_empty());
    assert_eq!(fx.books.purchases(fx.owner).len(), 1);
}

// ============================================================================
// Sufficiency invariant
// ============================================================================

#[test]
fn insufficient_funds_leaves_store_untouched() {
    let fx = Fixture::new();
    fx.seed_cash(dec!(40));
    let product = fx.products.create(fx.owner, "soap", 0, dec!(10), dec!(14));

    let err = fx
        .service
        .post(
            fx.owner,
            PostingEvent::Purchase {
                target: ProductTarget::Existing(product.id),
                quantity: 5,
                per_piece_cost: dec!(10),
                per_piece_selling_price: dec!(14),
                other_expenses: None,
                source: FundingSource::Cash,
            },
        )
        .unwrap_err();

    assert_eq!(
        err,
        PostError::Posting(PostingError::InsufficientFunds {
            source: LedgerKind::Cash,
            needed: dec!(50),
            available: dec!(40),
        })
    );
    // Zero writes: one opening entry, untouched stock, no purchase document.
    assert_eq!(fx.ledger.list(fx.owner, LedgerKind::Cash).len(), 1);
    assert_eq!(fx.cash_net(), dec!(40));
    assert_eq!(fx.products.get(fx.owner, product.id).unwrap().number_in_stock, 0);
    assert!(fx.books.purchases(fx.owner).is_empty());
}

#[test]
fn sequential_overspend_is_blocked_by_serialized_postings() {
    let fx = Fixture::new();
    fx.seed_cash(dec!(100));

    fx.service
        .post(fx.owner, PostingEvent::DrawCash { amount: dec!(60) })
        .unwrap();
    let err = fx
        .service
        .post(fx.owner, PostingEvent::DrawCash { amount: dec!(60) })
        .unwrap_err();

    assert!(matches!(
        err,
        PostError::Posting(PostingError::InsufficientFunds { .. })
    ));
    assert_eq!(fx.cash_net(), dec!(40));
}

// ============================================================================
// Stock invariant
// ============================================================================

#[test]
fn insufficient_stock_sale_changes_nothing() {
    let fx = Fixture::new();
    let product = fx.products.create(fx.owner, "soap", 3, dec!(10), dec!(14));

    let err = fx
        .service
        .post(
            fx.owner,
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
        )
        .unwrap_err();

    assert_eq!(
        err,
        PostError::Posting(PostingError::InsufficientStock {
            product: product.id,
            requested: 5,
            in_stock: 3,
        })
    );
    assert_eq!(fx.products.get(fx.owner, product.id).unwrap().number_in_stock, 3);
    assert!(fx.books.sales(fx.owner).is_empty());
}

// ============================================================================
// Atomicity
// ============================================================================

#[test]
fn failing_plan_applies_none_of_its_writes() {
    let fx = Fixture::new();
    fx.seed_cash(dec!(100));
    let creditor = fx.creditors.create(fx.owner, "Acme Traders", "0171", Some(dec!(50)));

    // Build a valid payment plan, then make its adjust target vanish before
    // commit: the insert ahead of the failing op must not survive.
    let entry = munim_core::ledger::LedgerEntry::new(
        fx.owner,
        LedgerKind::Cash,
        creditor.name.clone(),
        Direction::Credit,
        dec!(30),
        chrono::Utc::now(),
    );
    let mut plan = WritePlan::new();
    plan.insert(Document::LedgerEntry(entry));
    plan.adjust_creditor_due(creditor.id, dec!(-30));

    fx.creditors.delete(fx.owner, creditor.id).unwrap();

    let err = fx.store.commit(plan).unwrap_err();
    assert!(matches!(err, munim_db::CommitError::MissingTarget { .. }));
    assert_eq!(fx.ledger.list(fx.owner, LedgerKind::Cash).len(), 1);
    assert_eq!(fx.cash_net(), dec!(100));
}

// ============================================================================
// Return bound
// ============================================================================

#[test]
fn purchase_return_bound_holds_across_postings() {
    let fx = Fixture::new();
    let creditor = fx.creditors.create(fx.owner, "Acme Traders", "0171", None);

    let document = fx
        .service
        .post(
            fx.owner,
            PostingEvent::Purchase {
                target: ProductTarget::New {
                    name: "soap".into(),
                },
                quantity: 10,
                per_piece_cost: dec!(10),
                per_piece_selling_price: dec!(14),
                other_expenses: None,
                source: FundingSource::Credit(creditor.id),
            },
        )
        .unwrap();
    let Document::Purchase(purchase) = document else {
        panic!("expected a purchase");
    };
    let product = fx
        .products
        .list(fx.owner)
        .into_iter()
        .find(|p| p.product_name == "soap")
        .unwrap();

    let return_event = |quantity| PostingEvent::ReturnPurchase {
        purchase: purchase.id,
        product: product.id,
        quantity,
        per_piece_cost: dec!(10),
    };

    fx.service.post(fx.owner, return_event(4)).unwrap();

    let err = fx.service.post(fx.owner, return_event(7)).unwrap_err();
    assert_eq!(
        err,
        PostError::Posting(PostingError::ExceedsOriginal {
            requested: 7,
            returnable: 6,
        })
    );

    fx.service.post(fx.owner, return_event(6)).unwrap();

    // Cumulative returned is now the full original quantity.
    let returned: i64 = fx
        .books
        .purchase_returns(fx.owner)
        .iter()
        .map(|r| r.quantity)
        .sum();
    assert_eq!(returned, 10);
    assert_eq!(fx.products.get(fx.owner, product.id).unwrap().number_in_stock, 0);
    // Credit purchase fully returned: due is back to zero.
    assert_eq!(fx.creditors.get(fx.owner, creditor.id).unwrap().due, Decimal::ZERO);

    let err = fx.service.post(fx.owner, return_event(1)).unwrap_err();
    assert!(matches!(
        err,
        PostError::Posting(PostingError::ExceedsOriginal { .. })
    ));
}

#[test]
fn sales_return_restores_stock() {
    let fx = Fixture::new();
    let product = fx.products.create(fx.owner, "soap", 10, dec!(10), dec!(14));

    let document = fx
        .service
        .post(
            fx.owner,
            PostingEvent::Sale {
                lines: vec![SaleLineInput {
                    product_id: product.id,
                    quantity: 6,
                    unit_price: dec!(14),
                }],
                customer: None,
                payment: PaymentMethod::Cash,
                other_expenses: None,
            },
        )
        .unwrap();
    let Document::Sale(sale) = document else {
        panic!("expected a sale");
    };
    assert_eq!(fx.products.get(fx.owner, product.id).unwrap().number_in_stock, 4);

    fx.service
        .post(
            fx.owner,
            PostingEvent::ReturnSale {
                sale: sale.id,
                product: product.id,
                quantity: 2,
                unit_price: dec!(14),
            },
        )
        .unwrap();

    assert_eq!(fx.products.get(fx.owner, product.id).unwrap().number_in_stock, 6);
    assert_eq!(fx.books.sales_returns(fx.owner).len(), 1);
}

// ============================================================================
// Liabilities and settlements
// ============================================================================

#[test]
fn liability_draw_down_persists_interest_and_funds_ledger() {
    let fx = Fixture::new();

    let document = fx
        .service
        .post(
            fx.owner,
            PostingEvent::DrawDownLiability {
                name: "bank loan".into(),
                principal: dec!(1200),
                interest_rate: dec!(10),
                term_months: 12,
                other_expenses: None,
                source: LedgerKind::Bank,
            },
        )
        .unwrap();

    let Document::Liability(liability) = document else {
        panic!("expected a liability");
    };
    assert_eq!(liability.amount, dec!(1320));

    let bank = fx.ledger.net_position(fx.owner, LedgerKind::Bank);
    assert_eq!(bank.net(), dec!(1200));
    assert_eq!(fx.books.liabilities(fx.owner).len(), 1);
}

#[test]
fn settlement_reduces_outstanding_and_credits_ledger() {
    let fx = Fixture::new();
    fx.seed_cash(dec!(500));

    let document = fx
        .service
        .post(
            fx.owner,
            PostingEvent::DrawDownLiability {
                name: "bank loan".into(),
                principal: dec!(300),
                interest_rate: dec!(0),
                term_months: 6,
                other_expenses: None,
                source: LedgerKind::Cash,
            },
        )
        .unwrap();
    let Document::Liability(liability) = document else {
        panic!("expected a liability");
    };

    let err = fx
        .service
        .post(
            fx.owner,
            PostingEvent::Settle {
                target: SettleTarget::Liability(liability.id),
                amount: dec!(400),
                source: LedgerKind::Cash,
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        PostError::Posting(PostingError::AmountExceedsBalance { .. })
    ));

    fx.service
        .post(
            fx.owner,
            PostingEvent::Settle {
                target: SettleTarget::Liability(liability.id),
                amount: dec!(100),
                source: LedgerKind::Cash,
            },
        )
        .unwrap();

    assert_eq!(fx.books.liabilities(fx.owner)[0].amount, dec!(200));
    // 500 seed + 300 draw-down - 100 settlement.
    assert_eq!(fx.cash_net(), dec!(700));
}

// ============================================================================
// Payments and dues
// ============================================================================

#[test]
fn payments_move_dues_and_ledger_in_opposite_directions() {
    let fx = Fixture::new();
    fx.seed_cash(dec!(100));
    let creditor = fx.creditors.create(fx.owner, "Acme Traders", "0171", Some(dec!(80)));
    let customer = fx.customers.create(fx.owner, "Rahim", "0172", Some(dec!(60)));

    fx.service
        .post(
            fx.owner,
            PostingEvent::PaymentGiven {
                creditor: creditor.id,
                amount: dec!(30),
                source: LedgerKind::Cash,
            },
        )
        .unwrap();
    fx.service
        .post(
            fx.owner,
            PostingEvent::PaymentReceived {
                customer: customer.id,
                amount: dec!(25),
                target: LedgerKind::Cash,
            },
        )
        .unwrap();

    assert_eq!(fx.creditors.get(fx.owner, creditor.id).unwrap().due, dec!(50));
    assert_eq!(fx.customers.get(fx.owner, customer.id).unwrap().due, dec!(35));
    // 100 - 30 given + 25 received.
    assert_eq!(fx.cash_net(), dec!(95));
}

// ============================================================================
// Expenses and drawings
// ============================================================================

#[test]
fn expense_with_new_category_lands_both_documents() {
    let fx = Fixture::new();
    fx.seed_cash(dec!(100));

    fx.service
        .post(
            fx.owner,
            PostingEvent::Expense {
                name: "electricity".into(),
                amount: dec!(40),
                category: Some(munim_core::posting::CategoryTarget::New {
                    name: "utilities".into(),
                }),
                source: LedgerKind::Cash,
            },
        )
        .unwrap();

    assert_eq!(fx.books.expenses(fx.owner).len(), 1);
    assert_eq!(fx.books.categories(fx.owner).len(), 1);
    assert_eq!(fx.cash_net(), dec!(60));
}

#[test]
fn stock_drawing_values_and_removes_units() {
    let fx = Fixture::new();
    let product = fx.products.create(fx.owner, "soap", 10, dec!(10), dec!(14));

    let document = fx
        .service
        .post(
            fx.owner,
            PostingEvent::DrawStock {
                lines: vec![SaleLineInput {
                    product_id: product.id,
                    quantity: 4,
                    unit_price: dec!(14),
                }],
            },
        )
        .unwrap();

    let Document::Drawing(drawing) = document else {
        panic!("expected a drawing");
    };
    assert_eq!(drawing.amount, dec!(56));
    assert_eq!(fx.products.get(fx.owner, product.id).unwrap().number_in_stock, 6);
    assert_eq!(fx.books.drawings(fx.owner).len(), 1);
}

// ============================================================================
// Tenancy
// ============================================================================

#[test]
fn postings_cannot_touch_foreign_documents() {
    let fx = Fixture::new();
    let stranger = OwnerId::new();
    let creditor = fx.creditors.create(stranger, "Acme Traders", "0171", Some(dec!(80)));
    fx.seed_cash(dec!(100));

    let err = fx
        .service
        .post(
            fx.owner,
            PostingEvent::PaymentGiven {
                creditor: creditor.id,
                amount: dec!(30),
                source: LedgerKind::Cash,
            },
        )
        .unwrap_err();

    assert_eq!(err, PostError::Posting(PostingError::NotOwned));
    assert_eq!(fx.creditors.get(stranger, creditor.id).unwrap().due, dec!(80));
}
