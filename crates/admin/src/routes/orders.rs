//! Order listing routes.
//!
//! Orders are created by checkout flows elsewhere; the back office only
//! reads them. There is no form, no delete, and no row actions column.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use storeroom_core::Order;

use crate::{
    components::{DataTableConfig, data_table::orders_table_config},
    error::AppError,
    filters,
    middleware::{ActiveStore, RequireOperator},
    notifications::{self, ToastView, toast_views},
    state::AppState,
};

use super::StoreContext;

// =============================================================================
// Templates
// =============================================================================

/// Order row for template rendering.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: String,
    pub products: String,
    pub phone: String,
    pub address: String,
    pub total: String,
    pub paid: String,
    pub created_at: String,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            products: order.product_names.join(", "),
            phone: order.phone.clone(),
            address: order.address.clone(),
            total: order.total.to_string(),
            paid: if order.is_paid { "Paid" } else { "Unpaid" }.to_string(),
            created_at: filters::long_date(&order.created_at),
        }
    }
}

/// Order listing template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub store: StoreContext,
    pub orders: Vec<OrderView>,
    pub table: DataTableConfig,
    pub search_query: String,
    pub toasts: Vec<ToastView>,
}

/// List search parameters.
#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new().route("/{store_id}/orders", get(index))
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the order listing.
///
/// GET /{`store_id`}/orders
#[instrument(skip(state, session))]
async fn index(
    State(state): State<AppState>,
    RequireOperator(operator): RequireOperator,
    ActiveStore(store): ActiveStore,
    session: Session,
    Query(query): Query<SearchQuery>,
) -> Result<OrdersIndexTemplate, AppError> {
    let mut orders = state.platform().list_orders(store.id).await?;
    let search_query = query.q.map(|q| q.trim().to_string()).unwrap_or_default();
    if !search_query.is_empty() {
        let needle = search_query.to_lowercase();
        orders.retain(|o| {
            o.product_names
                .iter()
                .any(|name| name.to_lowercase().contains(&needle))
        });
    }
    let toasts = toast_views(&notifications::take(&session).await);

    Ok(OrdersIndexTemplate {
        store: StoreContext::new(&store, &operator, "orders"),
        orders: orders.iter().map(OrderView::from).collect(),
        table: orders_table_config(),
        search_query,
        toasts,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use storeroom_core::{CurrencyCode, OrderId, Price, StoreId};

    use super::*;

    fn sample_order() -> Order {
        Order {
            id: OrderId::new(),
            store_id: StoreId::new(),
            product_names: vec!["Canvas Tote".to_string(), "Enamel Mug".to_string()],
            phone: "555-0100".to_string(),
            address: "12 Harbor Lane".to_string(),
            total: Price::new(Decimal::new(4250, 2), CurrencyCode::USD),
            is_paid: true,
            created_at: chrono::Utc.with_ymd_and_hms(2024, 3, 3, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn order_view_joins_product_names() {
        let view = OrderView::from(&sample_order());
        assert_eq!(view.products, "Canvas Tote, Enamel Mug");
    }

    #[test]
    fn order_view_formats_total_and_paid_state() {
        let mut order = sample_order();
        let view = OrderView::from(&order);
        assert_eq!(view.total, "$42.50");
        assert_eq!(view.paid, "Paid");

        order.is_paid = false;
        let view = OrderView::from(&order);
        assert_eq!(view.paid, "Unpaid");
    }

    #[test]
    fn order_view_formats_created_date() {
        let view = OrderView::from(&sample_order());
        assert_eq!(view.created_at, "March 3rd, 2024");
    }
}
