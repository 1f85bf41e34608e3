use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use varsity_core::{DomainError, DomainResult, Entity, EventId, TicketId, UserId};

use crate::status::{TicketStatus, UserTicketStatus};

/// Lifecycle position of a ticket, as a single tagged state.
///
/// The two status axes of the legacy model (availability vs. holder payment)
/// are derived views over this sum type, so contradictory combinations such
/// as "sold but unpaid" cannot be constructed. Holder identity and the
/// transition timestamps live inside the variants that imply them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TicketState {
    /// On sale, no holder. Fresh tickets and administratively reset tickets
    /// start here.
    Available,
    /// Held by a user who has not paid yet.
    Reserved { holder: UserId },
    /// Paid for by the holder.
    Sold {
        holder: UserId,
        purchased_at: DateTime<Utc>,
    },
    /// Redeemed for entry.
    Used {
        holder: UserId,
        purchased_at: DateTime<Utc>,
        used_at: DateTime<Utc>,
    },
    /// Lapsed without redemption. The availability axis keeps its pre-expiry
    /// value, so `purchased_at` distinguishes an expired reservation from an
    /// expired purchase.
    Expired {
        holder: UserId,
        purchased_at: Option<DateTime<Utc>>,
    },
    /// Withdrawn by the holder or an administrator before use.
    Cancelled {
        holder: UserId,
        purchased_at: Option<DateTime<Utc>>,
    },
    /// Payment returned; the ticket is back on sale.
    Refunded,
}

impl TicketState {
    /// Short label used in transition-failure messages.
    pub fn label(&self) -> &'static str {
        match self {
            TicketState::Available => "available",
            TicketState::Reserved { .. } => "reserved",
            TicketState::Sold { .. } => "sold",
            TicketState::Used { .. } => "used",
            TicketState::Expired { .. } => "expired",
            TicketState::Cancelled { .. } => "cancelled",
            TicketState::Refunded => "refunded",
        }
    }
}

/// Aggregate root: a single admission ticket for an association event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    id: TicketId,
    name: String,
    description: Option<String>,
    price: Decimal,
    event_id: EventId,
    state: TicketState,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Create a ticket in its initial state (available, no holder).
    ///
    /// The caller is responsible for having verified `event_id` against the
    /// existence verifier; the aggregate only enforces structural invariants.
    pub fn new(
        id: TicketId,
        name: impl Into<String>,
        description: Option<String>,
        price: Decimal,
        event_id: EventId,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if price < Decimal::ZERO {
            return Err(DomainError::validation("price cannot be negative"));
        }

        Ok(Self {
            id,
            name,
            description,
            price,
            event_id,
            state: TicketState::Available,
            expires_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id_typed(&self) -> TicketId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn state(&self) -> &TicketState {
        &self.state
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Availability axis derived from the current state.
    ///
    /// `Refunded` projects to `available` (a refunded ticket is back on
    /// sale); `Expired` keeps the axis it had when it lapsed.
    pub fn ticket_status(&self) -> TicketStatus {
        match &self.state {
            TicketState::Available | TicketState::Refunded => TicketStatus::Available,
            TicketState::Reserved { .. } => TicketStatus::Reserved,
            TicketState::Sold { .. } => TicketStatus::Sold,
            TicketState::Used { .. } => TicketStatus::Used,
            TicketState::Cancelled { .. } => TicketStatus::Cancelled,
            TicketState::Expired { purchased_at, .. } => {
                if purchased_at.is_some() {
                    TicketStatus::Sold
                } else {
                    TicketStatus::Reserved
                }
            }
        }
    }

    /// Payment/usage axis derived from the current state; `None` while no
    /// holder position exists.
    ///
    /// `Refunded` reports a user status with no holder attached, matching
    /// the legacy records where the refund outcome outlives the cleared
    /// holder reference.
    pub fn user_status(&self) -> Option<UserTicketStatus> {
        match &self.state {
            TicketState::Available => None,
            TicketState::Reserved { .. } => Some(UserTicketStatus::NotPaid),
            TicketState::Sold { .. } => Some(UserTicketStatus::Paid),
            TicketState::Used { .. } => Some(UserTicketStatus::Used),
            TicketState::Expired { .. } => Some(UserTicketStatus::Expired),
            TicketState::Cancelled { .. } => Some(UserTicketStatus::Cancelled),
            TicketState::Refunded => Some(UserTicketStatus::Refunded),
        }
    }

    pub fn holder(&self) -> Option<UserId> {
        match &self.state {
            TicketState::Reserved { holder }
            | TicketState::Sold { holder, .. }
            | TicketState::Used { holder, .. }
            | TicketState::Expired { holder, .. }
            | TicketState::Cancelled { holder, .. } => Some(*holder),
            TicketState::Available | TicketState::Refunded => None,
        }
    }

    pub fn purchased_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            TicketState::Sold { purchased_at, .. } | TicketState::Used { purchased_at, .. } => {
                Some(*purchased_at)
            }
            TicketState::Expired { purchased_at, .. }
            | TicketState::Cancelled { purchased_at, .. } => *purchased_at,
            _ => None,
        }
    }

    pub fn used_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            TicketState::Used { used_at, .. } => Some(*used_at),
            _ => None,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Reserve the ticket for `user`.
    ///
    /// Allowed while the ticket is on sale, which includes the refunded
    /// state (a refund puts the ticket back on sale).
    pub fn reserve(&mut self, user: UserId, now: DateTime<Utc>) -> DomainResult<()> {
        match self.state {
            TicketState::Available | TicketState::Refunded => {
                self.state = TicketState::Reserved { holder: user };
                self.touch(now);
                Ok(())
            }
            ref other => Err(DomainError::invalid_transition("reserve", other.label())),
        }
    }

    /// Complete payment for the current reservation.
    ///
    /// `user` must match the reserving holder; a mismatched or absent holder
    /// fails the transition even though the ticket is otherwise unpaid.
    pub fn purchase(&mut self, user: UserId, now: DateTime<Utc>) -> DomainResult<()> {
        match self.state {
            TicketState::Reserved { holder } if holder == user => {
                self.state = TicketState::Sold {
                    holder,
                    purchased_at: now,
                };
                self.touch(now);
                Ok(())
            }
            ref other => Err(DomainError::invalid_transition("purchase", other.label())),
        }
    }

    /// Redeem the ticket for entry. Requires a sold, paid ticket.
    pub fn use_ticket(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        match self.state {
            TicketState::Sold {
                holder,
                purchased_at,
            } => {
                self.state = TicketState::Used {
                    holder,
                    purchased_at,
                    used_at: now,
                };
                self.touch(now);
                Ok(())
            }
            ref other => Err(DomainError::invalid_transition("use", other.label())),
        }
    }

    /// Cancel the current holder position (before or after payment).
    pub fn cancel(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        match self.state {
            TicketState::Reserved { holder } => {
                self.state = TicketState::Cancelled {
                    holder,
                    purchased_at: None,
                };
                self.touch(now);
                Ok(())
            }
            TicketState::Sold {
                holder,
                purchased_at,
            } => {
                self.state = TicketState::Cancelled {
                    holder,
                    purchased_at: Some(purchased_at),
                };
                self.touch(now);
                Ok(())
            }
            ref other => Err(DomainError::invalid_transition("cancel", other.label())),
        }
    }

    /// Return the holder's payment and put the ticket back on sale.
    ///
    /// Deliberately also applies to already-used tickets (post-event refund,
    /// admin override), reviving them to a sellable state. Holder reference
    /// and purchase/usage timestamps are cleared.
    pub fn refund(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        match self.state {
            TicketState::Sold { .. } | TicketState::Used { .. } => {
                self.state = TicketState::Refunded;
                self.touch(now);
                Ok(())
            }
            ref other => Err(DomainError::invalid_transition("refund", other.label())),
        }
    }

    /// Mark the holder position as lapsed. The availability axis is left
    /// unchanged; only the holder's payment axis moves to expired.
    pub fn expire(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        match self.state {
            TicketState::Reserved { holder } => {
                self.state = TicketState::Expired {
                    holder,
                    purchased_at: None,
                };
                self.touch(now);
                Ok(())
            }
            TicketState::Sold {
                holder,
                purchased_at,
            } => {
                self.state = TicketState::Expired {
                    holder,
                    purchased_at: Some(purchased_at),
                };
                self.touch(now);
                Ok(())
            }
            ref other => Err(DomainError::invalid_transition("expire", other.label())),
        }
    }

    /// Administrative reset: back to available from any state, clearing the
    /// holder, all transition timestamps, and the expiry deadline.
    pub fn make_available(&mut self, now: DateTime<Utc>) {
        self.state = TicketState::Available;
        self.expires_at = None;
        self.touch(now);
    }

    /// Rename the ticket. Name stays required non-empty.
    pub fn rename(&mut self, name: impl Into<String>, now: DateTime<Utc>) -> DomainResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        self.name = name;
        self.touch(now);
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>, now: DateTime<Utc>) {
        self.description = description;
        self.touch(now);
    }

    pub fn set_expires_at(&mut self, expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) {
        self.expires_at = expires_at;
        self.touch(now);
    }

    /// Re-point the ticket at another event.
    ///
    /// The orchestrator must have verified the new event id before calling.
    pub fn move_to_event(&mut self, event_id: EventId, now: DateTime<Utc>) {
        self.event_id = event_id;
        self.touch(now);
    }
}

impl Entity for Ticket {
    type Id = TicketId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ticket_id() -> TicketId {
        TicketId::new()
    }

    fn test_event_id() -> EventId {
        EventId::new()
    }

    fn test_user_id() -> UserId {
        UserId::new()
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn new_ticket() -> Ticket {
        Ticket::new(
            test_ticket_id(),
            "Home game",
            None,
            Decimal::new(10000, 2),
            test_event_id(),
            test_time(),
        )
        .unwrap()
    }

    #[test]
    fn new_ticket_starts_available_without_holder() {
        let ticket = new_ticket();
        assert_eq!(ticket.ticket_status(), TicketStatus::Available);
        assert_eq!(ticket.user_status(), None);
        assert_eq!(ticket.holder(), None);
        assert_eq!(ticket.purchased_at(), None);
        assert_eq!(ticket.used_at(), None);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Ticket::new(
            test_ticket_id(),
            "   ",
            None,
            Decimal::ONE,
            test_event_id(),
            test_time(),
        )
        .unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("name")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = Ticket::new(
            test_ticket_id(),
            "Home game",
            None,
            Decimal::new(-1, 2),
            test_event_id(),
            test_time(),
        )
        .unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("price")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn reserve_succeeds_only_while_available() {
        let mut ticket = new_ticket();
        let user = test_user_id();

        ticket.reserve(user, test_time()).unwrap();
        assert_eq!(ticket.ticket_status(), TicketStatus::Reserved);
        assert_eq!(ticket.user_status(), Some(UserTicketStatus::NotPaid));
        assert_eq!(ticket.holder(), Some(user));

        let err = ticket.reserve(test_user_id(), test_time()).unwrap_err();
        match err {
            DomainError::InvalidTransition { operation, state } => {
                assert_eq!(operation, "reserve");
                assert_eq!(state, "reserved");
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn purchase_requires_matching_holder() {
        let mut ticket = new_ticket();
        let holder = test_user_id();
        ticket.reserve(holder, test_time()).unwrap();

        let stranger = test_user_id();
        let err = ticket.purchase(stranger, test_time()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        // Unsuccessful purchase leaves the reservation untouched.
        assert_eq!(ticket.user_status(), Some(UserTicketStatus::NotPaid));

        ticket.purchase(holder, test_time()).unwrap();
        assert_eq!(ticket.ticket_status(), TicketStatus::Sold);
        assert_eq!(ticket.user_status(), Some(UserTicketStatus::Paid));
        assert!(ticket.purchased_at().is_some());
    }

    #[test]
    fn purchase_without_reservation_fails() {
        let mut ticket = new_ticket();
        let err = ticket.purchase(test_user_id(), test_time()).unwrap_err();
        match err {
            DomainError::InvalidTransition { operation, state } => {
                assert_eq!(operation, "purchase");
                assert_eq!(state, "available");
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn use_requires_sold_and_paid() {
        let mut ticket = new_ticket();
        let user = test_user_id();

        assert!(ticket.use_ticket(test_time()).is_err());

        ticket.reserve(user, test_time()).unwrap();
        assert!(ticket.use_ticket(test_time()).is_err());

        ticket.purchase(user, test_time()).unwrap();
        ticket.use_ticket(test_time()).unwrap();
        assert_eq!(ticket.ticket_status(), TicketStatus::Used);
        assert_eq!(ticket.user_status(), Some(UserTicketStatus::Used));
        assert!(ticket.used_at().is_some());

        // No double redemption.
        assert!(ticket.use_ticket(test_time()).is_err());
    }

    #[test]
    fn cancel_is_not_idempotent() {
        let mut ticket = new_ticket();
        ticket.reserve(test_user_id(), test_time()).unwrap();
        ticket.cancel(test_time()).unwrap();
        assert_eq!(ticket.ticket_status(), TicketStatus::Cancelled);
        assert_eq!(ticket.user_status(), Some(UserTicketStatus::Cancelled));

        let err = ticket.cancel(test_time()).unwrap_err();
        match err {
            DomainError::InvalidTransition { operation, state } => {
                assert_eq!(operation, "cancel");
                assert_eq!(state, "cancelled");
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn cancel_keeps_holder_reference() {
        let mut ticket = new_ticket();
        let user = test_user_id();
        ticket.reserve(user, test_time()).unwrap();
        ticket.purchase(user, test_time()).unwrap();
        ticket.cancel(test_time()).unwrap();
        assert_eq!(ticket.holder(), Some(user));
        assert!(ticket.purchased_at().is_some());
    }

    #[test]
    fn refund_paid_ticket_clears_holder_and_revives() {
        let mut ticket = new_ticket();
        let user = test_user_id();
        ticket.reserve(user, test_time()).unwrap();
        ticket.purchase(user, test_time()).unwrap();

        ticket.refund(test_time()).unwrap();
        assert_eq!(ticket.ticket_status(), TicketStatus::Available);
        assert_eq!(ticket.user_status(), Some(UserTicketStatus::Refunded));
        assert_eq!(ticket.holder(), None);
        assert_eq!(ticket.purchased_at(), None);
        assert_eq!(ticket.used_at(), None);

        // Revived ticket is reservable again.
        ticket.reserve(test_user_id(), test_time()).unwrap();
        assert_eq!(ticket.ticket_status(), TicketStatus::Reserved);
    }

    #[test]
    fn refund_applies_to_used_ticket() {
        let mut ticket = new_ticket();
        let user = test_user_id();
        ticket.reserve(user, test_time()).unwrap();
        ticket.purchase(user, test_time()).unwrap();
        ticket.use_ticket(test_time()).unwrap();

        ticket.refund(test_time()).unwrap();
        assert_eq!(ticket.ticket_status(), TicketStatus::Available);
        assert_eq!(ticket.user_status(), Some(UserTicketStatus::Refunded));
    }

    #[test]
    fn refund_requires_payment() {
        let mut ticket = new_ticket();
        ticket.reserve(test_user_id(), test_time()).unwrap();
        let err = ticket.refund(test_time()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn expire_keeps_availability_axis() {
        let mut ticket = new_ticket();
        let user = test_user_id();
        ticket.reserve(user, test_time()).unwrap();
        ticket.expire(test_time()).unwrap();
        assert_eq!(ticket.ticket_status(), TicketStatus::Reserved);
        assert_eq!(ticket.user_status(), Some(UserTicketStatus::Expired));

        let mut sold = new_ticket();
        sold.reserve(user, test_time()).unwrap();
        sold.purchase(user, test_time()).unwrap();
        sold.expire(test_time()).unwrap();
        assert_eq!(sold.ticket_status(), TicketStatus::Sold);
        assert_eq!(sold.user_status(), Some(UserTicketStatus::Expired));
    }

    #[test]
    fn make_available_resets_from_any_state() {
        let mut ticket = new_ticket();
        let user = test_user_id();
        ticket.set_expires_at(Some(test_time()), test_time());
        ticket.reserve(user, test_time()).unwrap();
        ticket.purchase(user, test_time()).unwrap();
        ticket.use_ticket(test_time()).unwrap();

        ticket.make_available(test_time());
        assert_eq!(ticket.ticket_status(), TicketStatus::Available);
        assert_eq!(ticket.user_status(), None);
        assert_eq!(ticket.holder(), None);
        assert_eq!(ticket.purchased_at(), None);
        assert_eq!(ticket.used_at(), None);
        assert_eq!(ticket.expires_at(), None);
    }

    #[test]
    fn transitions_refresh_updated_at() {
        let created = test_time();
        let later = created + chrono::Duration::seconds(30);
        let mut ticket = Ticket::new(
            test_ticket_id(),
            "Home game",
            None,
            Decimal::ONE,
            test_event_id(),
            created,
        )
        .unwrap();

        ticket.reserve(test_user_id(), later).unwrap();
        assert_eq!(ticket.updated_at(), later);
        assert_eq!(ticket.created_at(), created);
    }

    #[test]
    fn full_lifecycle_reserve_purchase_use() {
        let mut ticket = Ticket::new(
            test_ticket_id(),
            "Season final",
            Some("Tribune A".to_string()),
            Decimal::new(10000, 2),
            test_event_id(),
            test_time(),
        )
        .unwrap();
        let user = test_user_id();

        ticket.reserve(user, test_time()).unwrap();
        ticket.purchase(user, test_time()).unwrap();
        ticket.use_ticket(test_time()).unwrap();

        assert_eq!(ticket.ticket_status(), TicketStatus::Used);
        assert_eq!(ticket.user_status(), Some(UserTicketStatus::Used));
        assert_eq!(ticket.holder(), Some(user));
        assert!(ticket.purchased_at().is_some());
        assert!(ticket.used_at().is_some());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone, Copy)]
        enum Op {
            Reserve,
            Purchase,
            PurchaseStranger,
            Use,
            Cancel,
            Refund,
            Expire,
            MakeAvailable,
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                Just(Op::Reserve),
                Just(Op::Purchase),
                Just(Op::PurchaseStranger),
                Just(Op::Use),
                Just(Op::Cancel),
                Just(Op::Refund),
                Just(Op::Expire),
                Just(Op::MakeAvailable),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: no transition sequence can break the axis
            /// consistency table or touch the price.
            #[test]
            fn axes_stay_consistent_under_any_sequence(ops in proptest::collection::vec(op_strategy(), 0..24)) {
                let user = test_user_id();
                let stranger = test_user_id();
                let price = Decimal::new(4250, 2);
                let mut ticket = Ticket::new(
                    test_ticket_id(),
                    "prop ticket",
                    None,
                    price,
                    test_event_id(),
                    test_time(),
                ).unwrap();

                for op in ops {
                    // Failed transitions must leave the state untouched.
                    let before = ticket.clone();
                    let result = match op {
                        Op::Reserve => ticket.reserve(user, test_time()),
                        Op::Purchase => ticket.purchase(user, test_time()),
                        Op::PurchaseStranger => ticket.purchase(stranger, test_time()),
                        Op::Use => ticket.use_ticket(test_time()),
                        Op::Cancel => ticket.cancel(test_time()),
                        Op::Refund => ticket.refund(test_time()),
                        Op::Expire => ticket.expire(test_time()),
                        Op::MakeAvailable => {
                            ticket.make_available(test_time());
                            Ok(())
                        }
                    };
                    if result.is_err() {
                        prop_assert_eq!(&before, &ticket);
                    }

                    prop_assert_eq!(ticket.price(), price);
                    prop_assert!(ticket.price() >= Decimal::ZERO);

                    // Sold implies paid, used implies used, and a missing
                    // holder only occurs off the reserved/sold/used axis.
                    match ticket.ticket_status() {
                        TicketStatus::Sold => prop_assert!(matches!(
                            ticket.user_status(),
                            Some(UserTicketStatus::Paid) | Some(UserTicketStatus::Expired)
                        )),
                        TicketStatus::Used => {
                            prop_assert_eq!(ticket.user_status(), Some(UserTicketStatus::Used))
                        }
                        TicketStatus::Available => prop_assert!(matches!(
                            ticket.user_status(),
                            None | Some(UserTicketStatus::Refunded)
                        )),
                        _ => {}
                    }
                    if ticket.user_status().is_none() {
                        prop_assert_eq!(ticket.holder(), None);
                    }
                }
            }

            /// Property: reserve succeeds iff the availability axis is
            /// `available`, and success always yields an unpaid reservation.
            #[test]
            fn reserve_succeeds_iff_available(ops in proptest::collection::vec(op_strategy(), 0..12)) {
                let user = test_user_id();
                let mut ticket = Ticket::new(
                    test_ticket_id(),
                    "prop ticket",
                    None,
                    Decimal::ONE,
                    test_event_id(),
                    test_time(),
                ).unwrap();

                for op in ops {
                    let _ = match op {
                        Op::Reserve => ticket.reserve(user, test_time()),
                        Op::Purchase => ticket.purchase(user, test_time()),
                        Op::PurchaseStranger => ticket.purchase(test_user_id(), test_time()),
                        Op::Use => ticket.use_ticket(test_time()),
                        Op::Cancel => ticket.cancel(test_time()),
                        Op::Refund => ticket.refund(test_time()),
                        Op::Expire => ticket.expire(test_time()),
                        Op::MakeAvailable => {
                            ticket.make_available(test_time());
                            Ok(())
                        }
                    };
                }

                let was_available = ticket.ticket_status().can_be_reserved();
                let outcome = ticket.reserve(user, test_time());
                prop_assert_eq!(outcome.is_ok(), was_available);
                if was_available {
                    prop_assert_eq!(ticket.ticket_status(), TicketStatus::Reserved);
                    prop_assert_eq!(ticket.user_status(), Some(UserTicketStatus::NotPaid));
                    prop_assert_eq!(ticket.holder(), Some(user));
                }
            }
        }
    }
}
