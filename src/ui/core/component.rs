use crate::dom::{Element, Event, ListenerId};

/// Lifecycle shared by foundation-backed components.
///
/// Construction runs `initialise`, builds the foundation and then
/// `initial_sync_with_dom`; `destroy` undoes whatever the sync wired up.
pub trait Component {
    fn root(&self) -> &Element;

    fn initialise(&mut self) {}

    fn initial_sync_with_dom(&mut self) {}

    fn destroy(&mut self) {}

    fn listen(&self, kind: &str, handler: impl Fn(&Event) + 'static) -> ListenerId
    where
        Self: Sized,
    {
        self.root().add_event_listener(kind, handler)
    }

    fn unlisten(&self, id: ListenerId) {
        self.root().remove_event_listener(id);
    }
}
