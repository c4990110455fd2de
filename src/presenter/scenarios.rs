use crate::domain::catalog::ScenarioId;
use crate::domain::order::views::{self, DeliveryState, DispatchState};
use crate::domain::order::{OrderRecord, OrderStore, OrderTemplate};

use super::model::{Action, ActionKind, Panel, Presentation, Row};

const SCROLLABLE_BY_DATE: &str = "Scrollable list of variants (decreasing order of date)";
const NO_DATA: &str = "No data yet";

/// Presentation for `key`, or an empty one if the key is not a scenario.
pub fn present_by_key(key: &str, store: &OrderStore) -> Presentation {
    match key.parse::<ScenarioId>() {
        Ok(scenario) => present(scenario, store),
        Err(err) => {
            tracing::debug!(scenario = key, error = %err, "Nothing to present");
            Presentation::empty()
        }
    }
}

pub fn present(scenario: ScenarioId, store: &OrderStore) -> Presentation {
    let orders = store.all();

    let panels = match scenario {
        ScenarioId::AvcSingle => vec![advert_table("Created Adverts - Single Variant")],
        ScenarioId::AvcMultiple => vec![advert_table("Created Adverts - Multiple Variants")],
        ScenarioId::VuStocks => vec![variant_table(
            "Stock Updates",
            "Variants with no stock appear on top (decreasing order of date created)",
            "Stock Count",
        )],
        ScenarioId::VuWholesale => vec![variant_table(
            "Wholesale Price Updates",
            "Variants with no wholesale price appear on top (decreasing order of date created)",
            "Wholesale Price",
        )],
        ScenarioId::VuEol => vec![variant_table("EOL Status Updates", "Scrollable list of variants", "EOL Status")],
        ScenarioId::VuImages => vec![variant_table(
            "Image Management",
            "Scrollable list of variants",
            "Images Uploaded",
        )],
        ScenarioId::OfQuery => vec![Panel::new("Invoice Query", "Query marketplace order invoices")
            .columns(&["MP Order Invoice ID", "Queried"])
            .empty(NO_DATA)],
        ScenarioId::OfAcknowledgement => vec![
            Panel::new("Create Orders", "Click buttons to create orders with various combinations")
                .actions(OrderTemplate::PLAIN.into_iter().map(Action::create).collect()),
            pending_acknowledgement_panel(orders),
        ],
        ScenarioId::OfDispatch => vec![dispatch_panel(orders)],
        ScenarioId::OfDelivery => vec![delivery_panel(orders)],
        ScenarioId::OcPredispatch => vec![
            Panel::new("Create Acknowledged Orders", "Automatically creates and acknowledges an order")
                .actions(vec![Action::create(OrderTemplate::Acknowledged)]),
            pre_dispatch_panel(orders),
        ],
        ScenarioId::OcPostdispatch => vec![
            Panel::new(
                "Create Dispatched Orders",
                "Automatically creates, acknowledges, and dispatches an order",
            )
            .actions(vec![Action::create(OrderTemplate::Dispatched)]),
            post_dispatch_panel(orders),
        ],
        ScenarioId::RrAccept => vec![accept_refund_panel(orders), refund_status_panel()],
    };

    Presentation { scenario: Some(scenario), panels }
}

// ============================================================================
// Catalog placeholders: no data behind these tables yet
// ============================================================================

fn advert_table(title: &'static str) -> Panel {
    Panel::new(title, SCROLLABLE_BY_DATE)
        .columns(&["Advert ID", "Advert Name", "Variant IDs", "Variant MPN"])
        .empty(NO_DATA)
}

fn variant_table(title: &'static str, description: &'static str, value_column: &'static str) -> Panel {
    Panel::new(title, description)
        .columns(&["Variant ID", "Variant Name", "Variant MPN/EAN", value_column])
        .empty(NO_DATA)
}

// ============================================================================
// Order panels
// ============================================================================

fn pending_acknowledgement_panel(orders: &[OrderRecord]) -> Panel {
    let rows = views::pending_acknowledgement(orders)
        .into_iter()
        .map(|order| {
            Row::new(vec![
                order.id().to_string(),
                date_created(order),
                order.order_type().to_string(),
                "Pending".to_string(),
            ])
            .with_action(Action::new("Acknowledge", ActionKind::Acknowledge(order.id().clone())))
        })
        .collect();

    Panel::new("Orders Pending Acknowledgement", "Latest unacknowledged orders appear on top")
        .columns(&["Order ID", "Date Created", "Cart Details", "Status"])
        .rows(rows)
        .empty("No pending orders")
}

fn dispatch_panel(orders: &[OrderRecord]) -> Panel {
    let rows = views::awaiting_dispatch(orders)
        .into_iter()
        .map(|row| {
            let cells = vec![row.order.id().to_string(), row.state.label().to_string()];
            match row.state {
                DispatchState::Pending => Row::new(cells)
                    .with_action(Action::new("Dispatch", ActionKind::Dispatch(row.order.id().clone()))),
                DispatchState::Dispatched => Row::new(cells),
            }
        })
        .collect();

    Panel::new("Order Dispatch", "Acknowledged orders and dispatch status")
        .columns(&["Order ID", "Dispatch Status"])
        .rows(rows)
        .empty("No acknowledged orders")
}

fn delivery_panel(orders: &[OrderRecord]) -> Panel {
    let rows = views::awaiting_delivery(orders)
        .into_iter()
        .map(|row| {
            let cells = vec![row.order.id().to_string(), row.state.label().to_string()];
            match row.state {
                DeliveryState::InTransit => Row::new(cells)
                    .with_action(Action::new("Mark Delivered", ActionKind::Deliver(row.order.id().clone()))),
                DeliveryState::Delivered => Row::new(cells),
            }
        })
        .collect();

    Panel::new("Order Delivery", "Dispatched orders and delivery status")
        .columns(&["Order ID", "Delivery Status"])
        .rows(rows)
        .empty("No dispatched orders")
}

fn pre_dispatch_panel(orders: &[OrderRecord]) -> Panel {
    Panel::new("Pre-Dispatch Cancellations", "Orders available for pre-dispatch cancellation")
        .columns(&["Order ID", "Order Cancelled"])
        .rows(cancellation_rows(views::pre_dispatch_cancellable(orders)))
        .empty("No orders available for pre-dispatch cancellation")
}

fn post_dispatch_panel(orders: &[OrderRecord]) -> Panel {
    Panel::new(
        "Post-Dispatch Cancellations",
        "Acknowledged orders available for post-dispatch cancellation",
    )
    .columns(&["Order ID", "Order Cancelled"])
    .rows(cancellation_rows(views::post_dispatch_cancellable(orders)))
    .empty("No acknowledged orders available for cancellation")
}

fn cancellation_rows(rows: Vec<views::CancellationRow<'_>>) -> Vec<Row> {
    rows.into_iter()
        .map(|row| {
            let label = if row.cancelled { "Yes" } else { "No" };
            let base = Row::new(vec![row.order.id().to_string(), label.to_string()]);
            // Delivered orders are listed but can no longer be cancelled.
            if row.cancelled || row.order.delivered() {
                base
            } else {
                base.with_action(Action::new("Cancel", ActionKind::Cancel(row.order.id().clone())))
            }
        })
        .collect()
}

fn accept_refund_panel(orders: &[OrderRecord]) -> Panel {
    let eligible = views::refund_eligible(orders);
    let panel = Panel::new("Accept Refund", "Delivered orders waiting for refund")
        .columns(&["Order ID", "Action"])
        .empty("No delivered orders available for refund");

    if eligible.is_empty() {
        return panel.actions(vec![Action::new(
            "Create Order → Acknowledge → Dispatch → Deliver → Raise Return",
            ActionKind::Create(OrderTemplate::Dispatched),
        )]);
    }

    let rows = eligible
        .into_iter()
        .map(|order| {
            Row::new(vec![order.id().to_string(), "Raise Refund".to_string()])
                .with_action(Action::new("Raise Refund", ActionKind::RaiseRefund(order.id().clone())))
        })
        .collect();
    panel.rows(rows)
}

/// Raising a return only notifies, so there is never a row to show here.
fn refund_status_panel() -> Panel {
    Panel::new("Refund Status", "Return requests and their status")
        .columns(&["Order ID", "Refund Status"])
        .empty("No refund requests yet")
}

fn date_created(order: &OrderRecord) -> String {
    order.created_at().format("%Y-%m-%d %H:%M:%S").to_string()
}
