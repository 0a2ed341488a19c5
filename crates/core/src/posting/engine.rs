//! The posting engine.
//!
//! Each call is a single-shot saga: validate the event against a read-only
//! context, compute every derived amount, and build the atomic write plan.
//! Any validation failure returns before a plan exists, so zero writes can
//! ever follow from a rejected event. The engine performs no I/O; executing
//! the plan is the atomic writer's job.

use chrono::{DateTime, Utc};
use munim_shared::types::{
    AssetId, CategoryId, CreditorId, CustomerId, DrawingId, ExpenseId, LiabilityId, OwnerId,
    ProductId, PurchaseId, PurchaseReturnId, SaleId, SalesReturnId,
};
use rust_decimal::Decimal;

use crate::books::{
    Asset, Drawing, DrawingKind, Expense, ExpenseCategory, Liability, PaymentMethod, Purchase,
    PurchaseReturn, Sale, SaleLine, SalesReturn, simple_interest,
};
use crate::inventory::Product;
use crate::ledger::{Direction, LedgerEntry, LedgerKind};
use crate::party::{Creditor, Customer};

use super::context::PostingContext;
use super::error::PostingError;
use super::event::{
    CategoryTarget, FundingSource, PostingEvent, ProductTarget, ResolvedFunding, SaleLineInput,
    SettleTarget,
};
use super::plan::{Document, WritePlan};

/// The result of a successful posting: the primary document and the plan
/// that creates it.
#[derive(Debug, Clone)]
pub struct Posting {
    /// The newly created or updated primary document.
    pub document: Document,
    /// The atomic write set for this event.
    pub plan: WritePlan,
}

/// The ledger posting engine.
///
/// Pure business logic: no storage, no clock, no id source beyond the typed
/// id constructors. Lookups go through the [`PostingContext`] seam.
pub struct PostingEngine;

impl PostingEngine {
    /// Posts one business event, producing the primary document and the
    /// atomic write plan.
    ///
    /// # Errors
    ///
    /// Returns `PostingError` when validation fails; no plan is built in
    /// that case.
    pub fn post(
        owner: OwnerId,
        event: PostingEvent,
        now: DateTime<Utc>,
        ctx: &impl PostingContext,
    ) -> Result<Posting, PostingError> {
        match event {
            PostingEvent::AcquireAsset {
                name,
                amount,
                other_expenses,
                source,
            } => Self::acquire_asset(owner, &name, amount, other_expenses, source, now, ctx),
            PostingEvent::ExtendAsset {
                asset,
                amount,
                other_expenses,
                source,
            } => Self::extend_asset(owner, asset, amount, other_expenses, source, now, ctx),
            PostingEvent::DrawDownLiability {
                name,
                principal,
                interest_rate,
                term_months,
                other_expenses,
                source,
            } => {
                Self::draw_down_liability(
                    owner,
                    &name,
                    principal,
                    interest_rate,
                    term_months,
                    other_expenses,
                    source,
                    now,
                )
            }
            PostingEvent::Settle {
                target,
                amount,
                source,
            } => Self::settle(owner, target, amount, source, now, ctx),
            PostingEvent::Purchase {
                target,
                quantity,
                per_piece_cost,
                per_piece_selling_price,
                other_expenses,
                source,
            } => Self::purchase(
                owner,
                target,
                quantity,
                per_piece_cost,
                per_piece_selling_price,
                other_expenses,
                source,
                now,
                ctx,
            ),
            PostingEvent::Sale {
                lines,
                customer,
                payment,
                other_expenses,
            } => Self::sale(owner, &lines, customer, payment, other_expenses, now, ctx),
            PostingEvent::ReturnPurchase {
                purchase,
                product,
                quantity,
                per_piece_cost,
            } => Self::return_purchase(owner, purchase, product, quantity, per_piece_cost, now, ctx),
            PostingEvent::ReturnSale {
                sale,
                product,
                quantity,
                unit_price,
            } => Self::return_sale(owner, sale, product, quantity, unit_price, now, ctx),
            PostingEvent::PaymentGiven {
                creditor,
                amount,
                source,
            } => Self::payment_given(owner, creditor, amount, source, now, ctx),
            PostingEvent::PaymentReceived {
                customer,
                amount,
                target,
            } => Self::payment_received(owner, customer, amount, target, now, ctx),
            PostingEvent::Expense {
                name,
                amount,
                category,
                source,
            } => Self::expense(owner, &name, amount, category, source, now, ctx),
            PostingEvent::DrawCash { amount } => Self::draw_cash(owner, amount, now, ctx),
            PostingEvent::DrawStock { lines } => Self::draw_stock(owner, &lines, now, ctx),
        }
    }

    // ========================================================================
    // Event handlers
    // ========================================================================

    fn acquire_asset(
        owner: OwnerId,
        name: &str,
        amount: Decimal,
        other_expenses: Option<Decimal>,
        source: FundingSource,
        now: DateTime<Utc>,
        ctx: &impl PostingContext,
    ) -> Result<Posting, PostingError> {
        ensure_name(name, "name")?;
        ensure_positive(amount, "amount")?;
        let other = normalized_expenses(other_expenses)?;

        if ctx.asset_by_name(name).is_some() {
            return Err(PostingError::DuplicateAsset(name.to_string()));
        }

        let asset = Asset::new(owner, name, amount, other, now);
        let mut plan = WritePlan::new();

        match source.resolved() {
            ResolvedFunding::Credit(creditor_id) => {
                resolve_creditor(ctx, owner, creditor_id)?;
                plan.insert(Document::Asset(asset.clone()))
                    .adjust_creditor_due(creditor_id, amount);
            }
            ResolvedFunding::Ledger(kind) => {
                require_funds(ctx, kind, amount + other)?;
                let entry = LedgerEntry::new(
                    owner,
                    kind,
                    asset.name.clone(),
                    Direction::Credit,
                    amount + other,
                    now,
                );
                plan.insert(Document::Asset(asset.clone()))
                    .insert(Document::LedgerEntry(entry));
            }
        }

        Ok(Posting {
            document: Document::Asset(asset),
            plan,
        })
    }

    fn extend_asset(
        owner: OwnerId,
        asset_id: AssetId,
        amount: Decimal,
        other_expenses: Option<Decimal>,
        source: FundingSource,
        now: DateTime<Utc>,
        ctx: &impl PostingContext,
    ) -> Result<Posting, PostingError> {
        ensure_positive(amount, "amount")?;
        let other = normalized_expenses(other_expenses)?;
        let mut asset = resolve_asset(ctx, owner, asset_id)?;

        let mut plan = WritePlan::new();
        match source.resolved() {
            ResolvedFunding::Credit(creditor_id) => {
                resolve_creditor(ctx, owner, creditor_id)?;
                plan.adjust_asset_amount(asset_id, amount)
                    .adjust_creditor_due(creditor_id, amount);
            }
            ResolvedFunding::Ledger(kind) => {
                require_funds(ctx, kind, amount + other)?;
                let entry = LedgerEntry::new(
                    owner,
                    kind,
                    asset.name.clone(),
                    Direction::Credit,
                    amount + other,
                    now,
                );
                plan.adjust_asset_amount(asset_id, amount)
                    .insert(Document::LedgerEntry(entry));
            }
        }

        asset.amount += amount;
        Ok(Posting {
            document: Document::Asset(asset),
            plan,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_down_liability(
        owner: OwnerId,
        name: &str,
        principal: Decimal,
        interest_rate: Decimal,
        term_months: i64,
        other_expenses: Option<Decimal>,
        source: LedgerKind,
        now: DateTime<Utc>,
    ) -> Result<Posting, PostingError> {
        ensure_name(name, "name")?;
        ensure_positive(principal, "amount")?;
        ensure_non_negative(interest_rate, "interest rate")?;
        ensure_positive_quantity(term_months, "time")?;
        let other = normalized_expenses(other_expenses)?;

        let interest = simple_interest(principal, interest_rate, term_months);
        let liability = Liability {
            id: LiabilityId::new(),
            owner,
            name: name.to_string(),
            amount: principal + interest,
            interest_rate,
            term_months,
            other_expenses: other,
            date: now,
        };
        // The draw-down is money arriving: a debit on the chosen ledger.
        let entry = LedgerEntry::new(
            owner,
            source,
            name.to_string(),
            Direction::Debit,
            principal + other,
            now,
        );

        let mut plan = WritePlan::new();
        plan.insert(Document::Liability(liability.clone()))
            .insert(Document::LedgerEntry(entry));

        Ok(Posting {
            document: Document::Liability(liability),
            plan,
        })
    }

    fn settle(
        owner: OwnerId,
        target: SettleTarget,
        amount: Decimal,
        source: LedgerKind,
        now: DateTime<Utc>,
        ctx: &impl PostingContext,
    ) -> Result<Posting, PostingError> {
        ensure_positive(amount, "amount")?;

        let (name, outstanding) = match target {
            SettleTarget::Asset(id) => {
                let asset = resolve_asset(ctx, owner, id)?;
                (asset.name.clone(), asset.amount)
            }
            SettleTarget::Liability(id) => {
                let liability = resolve_liability(ctx, owner, id)?;
                (liability.name.clone(), liability.amount)
            }
        };

        if amount > outstanding {
            return Err(PostingError::AmountExceedsBalance {
                requested: amount,
                outstanding,
            });
        }
        require_funds(ctx, source, amount)?;

        let entry = LedgerEntry::new(owner, source, name, Direction::Credit, amount, now);
        let mut plan = WritePlan::new();
        let document = match target {
            SettleTarget::Asset(id) => {
                plan.adjust_asset_amount(id, -amount);
                let mut asset = resolve_asset(ctx, owner, id)?;
                asset.amount -= amount;
                Document::Asset(asset)
            }
            SettleTarget::Liability(id) => {
                plan.adjust_liability_amount(id, -amount);
                let mut liability = resolve_liability(ctx, owner, id)?;
                liability.amount -= amount;
                Document::Liability(liability)
            }
        };
        plan.insert(Document::LedgerEntry(entry));

        Ok(Posting { document, plan })
    }

    #[allow(clippy::too_many_arguments)]
    fn purchase(
        owner: OwnerId,
        target: ProductTarget,
        quantity: i64,
        per_piece_cost: Decimal,
        per_piece_selling_price: Decimal,
        other_expenses: Option<Decimal>,
        source: FundingSource,
        now: DateTime<Utc>,
        ctx: &impl PostingContext,
    ) -> Result<Posting, PostingError> {
        ensure_positive_quantity(quantity, "quantity")?;
        ensure_non_negative(per_piece_cost, "per piece cost")?;
        ensure_non_negative(per_piece_selling_price, "per piece selling price")?;
        let other = normalized_expenses(other_expenses)?;
        let total = Decimal::from(quantity) * per_piece_cost + other;

        // Resolve the stock side first: a brand-new product document, or an
        // increment against an existing one.
        enum StockSide {
            Insert(Product),
            Increment(ProductId),
        }
        let (product_name, stock_side) = match target {
            ProductTarget::New { name } => {
                ensure_name(&name, "product name")?;
                if ctx.product_by_name(&name).is_some() {
                    return Err(PostingError::DuplicateProduct(name));
                }
                let product = Product::new(
                    owner,
                    name.clone(),
                    quantity,
                    per_piece_cost,
                    per_piece_selling_price,
                );
                (name, StockSide::Insert(product))
            }
            ProductTarget::Existing(id) => {
                let product = resolve_product(ctx, owner, id)?;
                (product.product_name, StockSide::Increment(id))
            }
        };

        let mut plan = WritePlan::new();
        let purchase = match source.resolved() {
            ResolvedFunding::Credit(creditor_id) => {
                let creditor = resolve_creditor(ctx, owner, creditor_id)?;
                let purchase = Purchase {
                    id: PurchaseId::new(),
                    owner,
                    product_name,
                    payment: source.method(),
                    creditor: Some((&creditor).into()),
                    quantity,
                    per_piece_cost,
                    per_piece_selling_price,
                    other_expenses: other,
                    total_cost: total,
                    date: now,
                };
                plan.insert(Document::Purchase(purchase.clone()))
                    .adjust_creditor_due(creditor_id, total);
                purchase
            }
            ResolvedFunding::Ledger(kind) => {
                require_funds(ctx, kind, total)?;
                let purchase = Purchase {
                    id: PurchaseId::new(),
                    owner,
                    product_name: product_name.clone(),
                    payment: source.method(),
                    creditor: None,
                    quantity,
                    per_piece_cost,
                    per_piece_selling_price,
                    other_expenses: other,
                    total_cost: total,
                    date: now,
                };
                let entry = LedgerEntry::new(
                    owner,
                    kind,
                    product_name,
                    Direction::Credit,
                    total,
                    now,
                );
                plan.insert(Document::Purchase(purchase.clone()))
                    .insert(Document::LedgerEntry(entry));
                purchase
            }
        };

        match stock_side {
            StockSide::Insert(product) => {
                plan.insert(Document::Product(product));
            }
            StockSide::Increment(id) => {
                plan.adjust_stock(id, quantity);
            }
        }

        Ok(Posting {
            document: Document::Purchase(purchase),
            plan,
        })
    }

    fn sale(
        owner: OwnerId,
        lines: &[SaleLineInput],
        customer: Option<CustomerId>,
        payment: PaymentMethod,
        other_expenses: Option<Decimal>,
        now: DateTime<Utc>,
        ctx: &impl PostingContext,
    ) -> Result<Posting, PostingError> {
        let other = normalized_expenses(other_expenses)?;
        let resolved = resolve_lines(ctx, owner, lines)?;

        let customer_snapshot = match customer {
            Some(id) => Some((&resolve_customer(ctx, owner, id)?).into()),
            None => None,
        };

        let total: Decimal = resolved.iter().map(SaleLine::total).sum::<Decimal>() + other;
        let sale = Sale {
            id: SaleId::new(),
            owner,
            payment,
            customer: customer_snapshot,
            lines: resolved,
            other_expenses: other,
            total_amount: total,
            date: now,
        };

        let mut plan = WritePlan::new();
        plan.insert(Document::Sale(sale.clone()));
        for line in &sale.lines {
            plan.adjust_stock(line.product_id, -line.quantity);
        }

        Ok(Posting {
            document: Document::Sale(sale),
            plan,
        })
    }

    fn return_purchase(
        owner: OwnerId,
        purchase_id: PurchaseId,
        product_id: ProductId,
        quantity: i64,
        per_piece_cost: Decimal,
        now: DateTime<Utc>,
        ctx: &impl PostingContext,
    ) -> Result<Posting, PostingError> {
        ensure_positive_quantity(quantity, "quantity")?;
        ensure_non_negative(per_piece_cost, "per piece cost")?;

        let purchase = resolve_purchase(ctx, owner, purchase_id)?;
        let product = resolve_product(ctx, owner, product_id)?;
        if product.product_name != purchase.product_name {
            return Err(PostingError::Validation(
                "product does not match the purchase".to_string(),
            ));
        }

        let returned = ctx.quantity_returned_for_purchase(purchase_id);
        let returnable = purchase.quantity - returned;
        if quantity > returnable {
            return Err(PostingError::ExceedsOriginal {
                requested: quantity,
                returnable,
            });
        }
        // Returning a purchase hands the units back, so they must still be
        // in stock.
        if !product.has_sufficient_stock(quantity) {
            return Err(PostingError::InsufficientStock {
                product: product_id,
                requested: quantity,
                in_stock: product.number_in_stock,
            });
        }

        let total = Decimal::from(quantity) * per_piece_cost;
        let was_credit = purchase.payment == PaymentMethod::Credit;
        let creditor = purchase.creditor.clone();
        let purchase_return = PurchaseReturn {
            id: PurchaseReturnId::new(),
            owner,
            purchase,
            quantity,
            per_piece_cost,
            total_amount: total,
            date: now,
        };

        let mut plan = WritePlan::new();
        plan.insert(Document::PurchaseReturn(purchase_return.clone()))
            .adjust_stock(product_id, -quantity);
        if was_credit && let Some(snapshot) = creditor {
            plan.adjust_creditor_due(snapshot.id, -total);
        }

        Ok(Posting {
            document: Document::PurchaseReturn(purchase_return),
            plan,
        })
    }

    fn return_sale(
        owner: OwnerId,
        sale_id: SaleId,
        product_id: ProductId,
        quantity: i64,
        unit_price: Decimal,
        now: DateTime<Utc>,
        ctx: &impl PostingContext,
    ) -> Result<Posting, PostingError> {
        ensure_positive_quantity(quantity, "quantity")?;
        ensure_non_negative(unit_price, "price")?;

        let sale = resolve_sale(ctx, owner, sale_id)?;
        resolve_product(ctx, owner, product_id)?;

        let sold = sale.quantity_of(product_id);
        if sold == 0 {
            return Err(PostingError::Validation(
                "product is not part of the sale".to_string(),
            ));
        }
        let returned = ctx.quantity_returned_for_sale(sale_id, product_id);
        let returnable = sold - returned;
        if quantity > returnable {
            return Err(PostingError::ExceedsOriginal {
                requested: quantity,
                returnable,
            });
        }

        let total = Decimal::from(quantity) * unit_price;
        let sales_return = SalesReturn {
            id: SalesReturnId::new(),
            owner,
            sale,
            product_id,
            quantity,
            unit_price,
            total_amount: total,
            date: now,
        };

        let mut plan = WritePlan::new();
        plan.insert(Document::SalesReturn(sales_return.clone()))
            .adjust_stock(product_id, quantity);

        Ok(Posting {
            document: Document::SalesReturn(sales_return),
            plan,
        })
    }

    fn payment_given(
        owner: OwnerId,
        creditor_id: CreditorId,
        amount: Decimal,
        source: LedgerKind,
        now: DateTime<Utc>,
        ctx: &impl PostingContext,
    ) -> Result<Posting, PostingError> {
        ensure_positive(amount, "amount")?;
        let mut creditor = resolve_creditor(ctx, owner, creditor_id)?;
        require_funds(ctx, source, amount)?;

        let entry = LedgerEntry::new(
            owner,
            source,
            creditor.name.clone(),
            Direction::Credit,
            amount,
            now,
        );
        let mut plan = WritePlan::new();
        plan.insert(Document::LedgerEntry(entry))
            .adjust_creditor_due(creditor_id, -amount);

        creditor.due -= amount;
        Ok(Posting {
            document: Document::Creditor(creditor),
            plan,
        })
    }

    fn payment_received(
        owner: OwnerId,
        customer_id: CustomerId,
        amount: Decimal,
        target: LedgerKind,
        now: DateTime<Utc>,
        ctx: &impl PostingContext,
    ) -> Result<Posting, PostingError> {
        ensure_positive(amount, "amount")?;
        let mut customer = resolve_customer(ctx, owner, customer_id)?;
        // Money is arriving; no sufficiency check.

        let entry = LedgerEntry::new(
            owner,
            target,
            customer.name.clone(),
            Direction::Debit,
            amount,
            now,
        );
        let mut plan = WritePlan::new();
        plan.insert(Document::LedgerEntry(entry))
            .adjust_customer_due(customer_id, -amount);

        customer.due -= amount;
        Ok(Posting {
            document: Document::Customer(customer),
            plan,
        })
    }

    fn expense(
        owner: OwnerId,
        name: &str,
        amount: Decimal,
        category: Option<CategoryTarget>,
        source: LedgerKind,
        now: DateTime<Utc>,
        ctx: &impl PostingContext,
    ) -> Result<Posting, PostingError> {
        ensure_name(name, "name")?;
        ensure_positive(amount, "amount")?;
        require_funds(ctx, source, amount)?;

        let mut plan = WritePlan::new();
        let category_name = match category {
            None => None,
            Some(CategoryTarget::Existing(id)) => {
                Some(resolve_category(ctx, owner, id)?.name)
            }
            Some(CategoryTarget::New { name: category_name }) => {
                ensure_name(&category_name, "category name")?;
                match ctx.category_by_name(&category_name) {
                    Some(existing) => Some(existing.name),
                    None => {
                        let new_category = ExpenseCategory::new(owner, category_name.clone());
                        plan.insert(Document::ExpenseCategory(new_category));
                        Some(category_name)
                    }
                }
            }
        };

        let expense = Expense {
            id: ExpenseId::new(),
            owner,
            name: name.to_string(),
            amount,
            category: category_name,
            date: now,
        };
        let entry = LedgerEntry::new(
            owner,
            source,
            name.to_string(),
            Direction::Credit,
            amount,
            now,
        );
        plan.insert(Document::Expense(expense.clone()))
            .insert(Document::LedgerEntry(entry));

        Ok(Posting {
            document: Document::Expense(expense),
            plan,
        })
    }

    fn draw_cash(
        owner: OwnerId,
        amount: Decimal,
        now: DateTime<Utc>,
        ctx: &impl PostingContext,
    ) -> Result<Posting, PostingError> {
        ensure_positive(amount, "amount")?;
        require_funds(ctx, LedgerKind::Cash, amount)?;

        let drawing = Drawing {
            id: DrawingId::new(),
            owner,
            kind: DrawingKind::Cash,
            amount,
            date: now,
        };
        let entry = LedgerEntry::new(
            owner,
            LedgerKind::Cash,
            "drawings",
            Direction::Credit,
            amount,
            now,
        );
        let mut plan = WritePlan::new();
        plan.insert(Document::Drawing(drawing.clone()))
            .insert(Document::LedgerEntry(entry));

        Ok(Posting {
            document: Document::Drawing(drawing),
            plan,
        })
    }

    fn draw_stock(
        owner: OwnerId,
        lines: &[SaleLineInput],
        now: DateTime<Utc>,
        ctx: &impl PostingContext,
    ) -> Result<Posting, PostingError> {
        let resolved = resolve_lines(ctx, owner, lines)?;
        let amount: Decimal = resolved.iter().map(SaleLine::total).sum();

        let drawing = Drawing {
            id: DrawingId::new(),
            owner,
            kind: DrawingKind::Stock,
            amount,
            date: now,
        };
        let mut plan = WritePlan::new();
        plan.insert(Document::Drawing(drawing.clone()));
        for line in &resolved {
            plan.adjust_stock(line.product_id, -line.quantity);
        }

        Ok(Posting {
            document: Document::Drawing(drawing),
            plan,
        })
    }
}

// ============================================================================
// Shared validation and lookup helpers
// ============================================================================

fn ensure_name(value: &str, field: &str) -> Result<(), PostingError> {
    if value.trim().is_empty() {
        return Err(PostingError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn ensure_positive(amount: Decimal, field: &str) -> Result<(), PostingError> {
    if amount <= Decimal::ZERO {
        return Err(PostingError::Validation(format!(
            "{field} must be positive"
        )));
    }
    Ok(())
}

fn ensure_non_negative(amount: Decimal, field: &str) -> Result<(), PostingError> {
    if amount < Decimal::ZERO {
        return Err(PostingError::Validation(format!(
            "{field} cannot be negative"
        )));
    }
    Ok(())
}

fn ensure_positive_quantity(quantity: i64, field: &str) -> Result<(), PostingError> {
    if quantity <= 0 {
        return Err(PostingError::Validation(format!(
            "{field} must be positive"
        )));
    }
    Ok(())
}

fn normalized_expenses(other_expenses: Option<Decimal>) -> Result<Decimal, PostingError> {
    let other = other_expenses.unwrap_or(Decimal::ZERO);
    ensure_non_negative(other, "other expenses")?;
    Ok(other)
}

fn require_funds(
    ctx: &impl PostingContext,
    kind: LedgerKind,
    needed: Decimal,
) -> Result<(), PostingError> {
    let available = ctx.net_balance(kind);
    if needed > available {
        return Err(PostingError::InsufficientFunds {
            source: kind,
            needed,
            available,
        });
    }
    Ok(())
}

fn resolve_product(
    ctx: &impl PostingContext,
    owner: OwnerId,
    id: ProductId,
) -> Result<Product, PostingError> {
    let product = ctx.product(id).ok_or(PostingError::ProductNotFound(id))?;
    if product.owner != owner {
        return Err(PostingError::NotOwned);
    }
    Ok(product)
}

fn resolve_creditor(
    ctx: &impl PostingContext,
    owner: OwnerId,
    id: CreditorId,
) -> Result<Creditor, PostingError> {
    let creditor = ctx.creditor(id).ok_or(PostingError::CreditorNotFound(id))?;
    if creditor.owner != owner {
        return Err(PostingError::NotOwned);
    }
    Ok(creditor)
}

fn resolve_customer(
    ctx: &impl PostingContext,
    owner: OwnerId,
    id: CustomerId,
) -> Result<Customer, PostingError> {
    let customer = ctx.customer(id).ok_or(PostingError::CustomerNotFound(id))?;
    if customer.owner != owner {
        return Err(PostingError::NotOwned);
    }
    Ok(customer)
}

fn resolve_purchase(
    ctx: &impl PostingContext,
    owner: OwnerId,
    id: PurchaseId,
) -> Result<Purchase, PostingError> {
    let purchase = ctx.purchase(id).ok_or(PostingError::PurchaseNotFound(id))?;
    if purchase.owner != owner {
        return Err(PostingError::NotOwned);
    }
    Ok(purchase)
}

fn resolve_sale(
    ctx: &impl PostingContext,
    owner: OwnerId,
    id: SaleId,
) -> Result<Sale, PostingError> {
    let sale = ctx.sale(id).ok_or(PostingError::SaleNotFound(id))?;
    if sale.owner != owner {
        return Err(PostingError::NotOwned);
    }
    Ok(sale)
}

fn resolve_asset(
    ctx: &impl PostingContext,
    owner: OwnerId,
    id: AssetId,
) -> Result<Asset, PostingError> {
    let asset = ctx.asset(id).ok_or(PostingError::AssetNotFound(id))?;
    if asset.owner != owner {
        return Err(PostingError::NotOwned);
    }
    Ok(asset)
}

fn resolve_liability(
    ctx: &impl PostingContext,
    owner: OwnerId,
    id: LiabilityId,
) -> Result<Liability, PostingError> {
    let liability = ctx
        .liability(id)
        .ok_or(PostingError::LiabilityNotFound(id))?;
    if liability.owner != owner {
        return Err(PostingError::NotOwned);
    }
    Ok(liability)
}

fn resolve_category(
    ctx: &impl PostingContext,
    owner: OwnerId,
    id: CategoryId,
) -> Result<ExpenseCategory, PostingError> {
    let category = ctx.category(id).ok_or(PostingError::CategoryNotFound(id))?;
    if category.owner != owner {
        return Err(PostingError::NotOwned);
    }
    Ok(category)
}

/// Resolves requested lines against inventory, checking stock per product
/// across the whole request (two lines of the same product count together).
fn resolve_lines(
    ctx: &impl PostingContext,
    owner: OwnerId,
    lines: &[SaleLineInput],
) -> Result<Vec<SaleLine>, PostingError> {
    if lines.is_empty() {
        return Err(PostingError::Validation(
            "at least one line is required".to_string(),
        ));
    }

    let mut totals: Vec<(Product, i64)> = Vec::new();
    let mut resolved = Vec::with_capacity(lines.len());

    for line in lines {
        ensure_positive_quantity(line.quantity, "quantity")?;
        ensure_non_negative(line.unit_price, "price")?;

        let product_name = match totals.iter_mut().find(|(p, _)| p.id == line.product_id) {
            Some((product, requested)) => {
                *requested += line.quantity;
                product.product_name.clone()
            }
            None => {
                let product = resolve_product(ctx, owner, line.product_id)?;
                let name = product.product_name.clone();
                totals.push((product, line.quantity));
                name
            }
        };

        resolved.push(SaleLine {
            product_id: line.product_id,
            product_name,
            quantity: line.quantity,
            unit_price: line.unit_price,
        });
    }

    for (product, requested) in &totals {
        if !product.has_sufficient_stock(*requested) {
            return Err(PostingError::InsufficientStock {
                product: product.id,
                requested: *requested,
                in_stock: product.number_in_stock,
            });
        }
    }

    Ok(resolved)
}
