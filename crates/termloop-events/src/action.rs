/// What a component's pure `event_to_msg` function decided to do with an
/// event it was routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventAction<M> {
    /// Turn the event into this message, enqueued for this component.
    Msg(M),
    /// Drop the event; nothing is enqueued.
    Ignore,
    /// Walk to the parent component (per the registry's parent link) and
    /// ask it the same question. A root component that returns this drops
    /// the event, since it has no parent.
    Propagate,
}
