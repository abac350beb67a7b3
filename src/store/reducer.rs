//! Pure state transitions.

use crate::{
    cart,
    store::{actions::Action, state::AppState},
};

/// Apply `action` to `state`, returning the next snapshot.
///
/// Total: every action is accepted, and actions naming unknown cart lines or
/// orders leave the state unchanged.
#[must_use]
pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();

    match action {
        Action::SetUser(user) => next.user = Some(user),
        Action::SetAuthenticated(is_authenticated) => next.is_authenticated = is_authenticated,
        Action::Logout => {
            next.user = None;
            next.is_authenticated = false;
            next.cart.clear();
            next.orders.clear();
        }
        Action::SetCart(lines) => next.cart = cart::normalize(lines),
        Action::AddToCart(line) => cart::add_line(&mut next.cart, line),
        Action::RemoveFromCart(item_id) => next.cart.retain(|line| line.item_id != item_id),
        Action::UpdateCartItemQuantity { item_id, quantity } => {
            if quantity == 0 {
                next.cart.retain(|line| line.item_id != item_id);
            } else if let Some(line) = next.cart.iter_mut().find(|line| line.item_id == item_id) {
                line.quantity = quantity;
            }
        }
        Action::ClearCart => next.cart.clear(),
        Action::SetOrders(orders) => next.orders = orders,
        Action::AddOrder(order) => next.orders.insert(0, order),
        Action::UpdateOrderStatus {
            order_id,
            status,
            at,
        } => {
            if let Some(order) = next.orders.iter_mut().find(|order| order.id == order_id) {
                order.status = status;
                order.updated_at = at;
            }
        }
        Action::OrderPlaced(order) => {
            next.orders.insert(0, order);
            next.cart.clear();
        }
        Action::SetMenuItems(items) => next.menu_items = items,
        Action::SetCategories(categories) => next.categories = categories,
        Action::SetLoading(is_loading) => next.is_loading = is_loading,
        Action::SetError(error) => next.error = error,
    }

    next
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        cart::CartItem,
        menu::fixtures::{COFFEE, MASALA_DOSA, VEG_THALI},
        orders::{models::OrderUuid, status::OrderStatus},
        testing::{line, order, user},
    };

    use super::*;

    fn with_cart(cart: Vec<CartItem>) -> AppState {
        AppState {
            cart,
            ..AppState::default()
        }
    }

    #[test]
    fn add_to_cart_appends_new_line() -> TestResult {
        let state = reduce(&AppState::default(), Action::AddToCart(line(COFFEE, 1)?));

        assert_eq!(state.cart.len(), 1);
        assert_eq!(state.cart_item_count(), 1);

        Ok(())
    }

    #[test]
    fn add_to_cart_merges_existing_line() -> TestResult {
        let state = with_cart(vec![line(MASALA_DOSA, 1)?]);

        let state = reduce(&state, Action::AddToCart(line(MASALA_DOSA, 2)?));

        assert_eq!(state.cart.len(), 1);
        assert_eq!(state.cart.first().map(|line| line.quantity), Some(3));

        Ok(())
    }

    #[test]
    fn adding_zero_is_a_no_op() -> TestResult {
        let state = with_cart(vec![line(COFFEE, 1)?]);

        assert_eq!(reduce(&state, Action::AddToCart(line(COFFEE, 0)?)), state);
        assert_eq!(
            reduce(&AppState::default(), Action::AddToCart(line(COFFEE, 0)?)),
            AppState::default()
        );

        Ok(())
    }

    #[test]
    fn set_cart_merges_duplicates_and_drops_zero_quantities() -> TestResult {
        let state = reduce(
            &AppState::default(),
            Action::SetCart(vec![
                line(COFFEE, 0)?,
                line(COFFEE, 2)?,
                line(VEG_THALI, 1)?,
                line(COFFEE, 1)?,
            ]),
        );

        assert_eq!(state.cart, vec![line(COFFEE, 3)?, line(VEG_THALI, 1)?]);

        let state = reduce(&AppState::default(), Action::SetCart(vec![line(COFFEE, 0)?]));

        assert!(state.cart.is_empty());

        Ok(())
    }

    #[test]
    fn quantity_zero_removes_line() -> TestResult {
        let state = with_cart(vec![line(COFFEE, 2)?, line(VEG_THALI, 1)?]);

        let state = reduce(
            &state,
            Action::UpdateCartItemQuantity {
                item_id: COFFEE,
                quantity: 0,
            },
        );

        assert_eq!(state.cart, vec![line(VEG_THALI, 1)?]);

        Ok(())
    }

    #[test]
    fn quantity_replaces_rather_than_adds() -> TestResult {
        let state = with_cart(vec![line(COFFEE, 2)?]);

        let state = reduce(
            &state,
            Action::UpdateCartItemQuantity {
                item_id: COFFEE,
                quantity: 5,
            },
        );

        assert_eq!(state.cart_item_count(), 5);

        Ok(())
    }

    #[test]
    fn unknown_cart_line_is_a_no_op() -> TestResult {
        let state = with_cart(vec![line(COFFEE, 2)?]);

        let update = Action::UpdateCartItemQuantity {
            item_id: VEG_THALI,
            quantity: 4,
        };

        assert_eq!(reduce(&state, update), state);
        assert_eq!(reduce(&state, Action::RemoveFromCart(VEG_THALI)), state);

        Ok(())
    }

    #[test]
    fn cart_totals_follow_cart() -> TestResult {
        let state = with_cart(vec![line(MASALA_DOSA, 2)?, line(VEG_THALI, 1)?]);

        assert_eq!(state.cart_totals().subtotal, Decimal::from(170));
        assert_eq!(state.cart_totals().total, Decimal::new(1819, 1));

        let state = reduce(&state, Action::RemoveFromCart(VEG_THALI));

        assert_eq!(state.cart_totals().subtotal, Decimal::from(90));

        Ok(())
    }

    #[test]
    fn add_order_prepends() {
        let first = order(Vec::new());
        let second = order(Vec::new());

        let state = reduce(&AppState::default(), Action::AddOrder(first.clone()));
        let state = reduce(&state, Action::AddOrder(second.clone()));

        assert_eq!(state.orders, vec![second, first]);
    }

    #[test]
    fn order_placed_adds_order_and_clears_cart_together() -> TestResult {
        let cart = vec![line(MASALA_DOSA, 2)?];
        let placed = order(cart.clone());

        let state = reduce(&with_cart(cart), Action::OrderPlaced(placed.clone()));

        assert!(state.cart.is_empty());
        assert_eq!(state.orders, vec![placed]);

        Ok(())
    }

    #[test]
    fn update_order_status_touches_only_matching_order() {
        let tracked = order(Vec::new());
        let other = order(Vec::new());
        let at = Timestamp::now();

        let state = AppState {
            orders: vec![tracked.clone(), other.clone()],
            ..AppState::default()
        };

        let state = reduce(
            &state,
            Action::UpdateOrderStatus {
                order_id: tracked.id,
                status: OrderStatus::Confirmed,
                at,
            },
        );

        let updated = state.order(tracked.id);

        assert_eq!(updated.map(|order| order.status), Some(OrderStatus::Confirmed));
        assert_eq!(updated.map(|order| order.updated_at), Some(at));
        assert_eq!(state.order(other.id), Some(&other));
    }

    #[test]
    fn update_unknown_order_is_a_no_op() {
        let state = AppState {
            orders: vec![order(Vec::new())],
            ..AppState::default()
        };

        let update = Action::UpdateOrderStatus {
            order_id: OrderUuid::new(),
            status: OrderStatus::Completed,
            at: Timestamp::now(),
        };

        assert_eq!(reduce(&state, update), state);
    }

    #[test]
    fn illegal_status_change_is_still_recorded() {
        let mut completed = order(Vec::new());
        completed.status = OrderStatus::Completed;

        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Pending));

        let state = AppState {
            orders: vec![completed.clone()],
            ..AppState::default()
        };

        let state = reduce(
            &state,
            Action::UpdateOrderStatus {
                order_id: completed.id,
                status: OrderStatus::Pending,
                at: Timestamp::now(),
            },
        );

        assert_eq!(
            state.order(completed.id).map(|order| order.status),
            Some(OrderStatus::Pending)
        );
    }

    #[test]
    fn logout_clears_session_cart_and_orders() -> TestResult {
        let state = AppState {
            user: Some(user()),
            is_authenticated: true,
            cart: vec![line(COFFEE, 1)?],
            orders: vec![order(Vec::new())],
            error: Some("Login failed".to_string()),
            ..AppState::default()
        };

        let state = reduce(&state, Action::Logout);

        assert_eq!(state.user, None);
        assert!(!state.is_authenticated);
        assert!(state.cart.is_empty());
        assert!(state.orders.is_empty());
        assert_eq!(state.error.as_deref(), Some("Login failed"));

        Ok(())
    }

    #[test]
    fn flags_and_catalogue_are_replaced() {
        let state = reduce(&AppState::default(), Action::SetLoading(true));
        let state = reduce(&state, Action::SetError(Some("Failed to fetch menu data".into())));
        let state = reduce(&state, Action::SetMenuItems(crate::menu::fixtures::menu_items()));

        assert!(state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch menu data"));
        assert_eq!(state.menu_items.len(), 6);

        let state = reduce(&state, Action::SetError(None));

        assert_eq!(state.error, None);
    }
}
