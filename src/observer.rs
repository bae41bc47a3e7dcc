use crate::error::TreeError;
use crate::tree::Tree;
use crate::tree_node::EdgeId;
use ego_tree::NodeId;
use std::fmt;
use std::thread;
use std::time::Duration;
use tracing::{instrument, trace};

/// Default hold time of a highlight pulse.
pub const DEFAULT_PULSE_DELAY: Duration = Duration::from_millis(500);

/// A step of a search or traversal, in the order it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent {
    /// The search is about to expand the children of `node`.
    Enter { node: NodeId },
    /// A child finished evaluating with `value`.
    Evaluated { node: NodeId, value: i32 },
    /// The subtree below `child` was skipped and its incoming `edge` marked.
    Pruned { edge: EdgeId, child: NodeId },
    /// `node` received its final value.
    Settled { node: NodeId, value: i32 },
    /// The highlight flag of `node` changed.
    Highlight { node: NodeId, on: bool },
}

/// Hook invoked by the alpha-beta core at every step.
///
/// Observers may change display flags on the tree they are handed but must
/// leave its values and structure alone.
pub trait SearchObserver {
    fn notify(&mut self, tree: &mut Tree, event: SearchEvent) -> Result<(), TreeError>;
}

/// Observer of the synchronous search: does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn notify(&mut self, _tree: &mut Tree, _event: SearchEvent) -> Result<(), TreeError> {
        Ok(())
    }
}

type Callback = Box<dyn FnMut(&Tree, &SearchEvent)>;

/// Registry of callbacks, each called with the tree after every change.
///
/// This is the adapter a presentation layer subscribes through; the core
/// itself only writes plain fields.
#[derive(Default)]
pub struct Subscribers {
    callbacks: Vec<Callback>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&Tree, &SearchEvent) + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn publish(&mut self, tree: &Tree, event: &SearchEvent) {
        for callback in &mut self.callbacks {
            callback(tree, event);
        }
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl SearchObserver for Subscribers {
    fn notify(&mut self, tree: &mut Tree, event: SearchEvent) -> Result<(), TreeError> {
        self.publish(tree, &event);
        Ok(())
    }
}

/// Turns search steps into timed highlight pulses.
///
/// A pulse sets the node's highlight flag, holds it for `delay` and clears
/// it again. The calling thread is blocked for the whole pulse, so pulses
/// never overlap.
#[derive(Debug)]
pub struct Animator {
    delay: Duration,
    subscribers: Subscribers,
}

impl Default for Animator {
    fn default() -> Self {
        Animator::new(DEFAULT_PULSE_DELAY)
    }
}

impl Animator {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            subscribers: Subscribers::new(),
        }
    }

    pub fn with_subscriber<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Tree, &SearchEvent) + 'static,
    {
        self.subscribers.subscribe(callback);
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn subscribers_mut(&mut self) -> &mut Subscribers {
        &mut self.subscribers
    }

    pub fn pulse(&mut self, tree: &mut Tree, node: NodeId) -> Result<(), TreeError> {
        self.set_highlight(tree, node, true)?;
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.set_highlight(tree, node, false)
    }

    fn set_highlight(&mut self, tree: &mut Tree, node: NodeId, on: bool) -> Result<(), TreeError> {
        tree.set_highlighted(node, on)?;
        self.subscribers
            .publish(tree, &SearchEvent::Highlight { node, on });
        Ok(())
    }
}

impl SearchObserver for Animator {
    fn notify(&mut self, tree: &mut Tree, event: SearchEvent) -> Result<(), TreeError> {
        self.subscribers.publish(tree, &event);
        match event {
            SearchEvent::Enter { node } | SearchEvent::Evaluated { node, .. } => {
                self.pulse(tree, node)
            }
            _ => Ok(()),
        }
    }
}

/// Pulses every node below and including `node` in post-order.
///
/// Purely visual: values and edges are left untouched. `None` is a no-op.
#[instrument(level = "trace", skip(tree, animator))]
pub fn traversal_highlight(
    tree: &mut Tree,
    node: Option<NodeId>,
    animator: &mut Animator,
) -> Result<(), TreeError> {
    let Some(node) = node else {
        return Ok(());
    };
    for child in tree.children(node) {
        traversal_highlight(tree, Some(child), animator)?;
    }
    trace!(?node, "traversal pulse");
    animator.pulse(tree, node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::tree_from_leaves;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_animator() -> (Animator, Rc<RefCell<Vec<SearchEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let animator = Animator::new(Duration::ZERO)
            .with_subscriber(move |_, event| sink.borrow_mut().push(*event));
        (animator, events)
    }

    #[test]
    fn pulse_sets_and_clears_the_flag() {
        // arrange
        let mut tree = tree_from_leaves(2, 2, &[1, 2]);
        let root = tree.root_id().unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut animator = Animator::new(Duration::ZERO)
            .with_subscriber(move |tree, _| sink.borrow_mut().push(tree.node(root).unwrap().highlighted));

        // act
        animator.pulse(&mut tree, root).unwrap();

        // assert
        assert_eq!(*seen.borrow(), vec![true, false]);
        assert!(!tree.node(root).unwrap().highlighted);
    }

    #[test]
    fn traversal_visits_in_post_order() {
        let mut tree = tree_from_leaves(3, 2, &[1, 2, 3, 4]);
        let (mut animator, events) = recording_animator();

        let root = tree.root_id();
        traversal_highlight(&mut tree, root, &mut animator).unwrap();

        let lit: Vec<Option<i32>> = events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                SearchEvent::Highlight { node, on: true } => Some(tree.value(*node)),
                _ => None,
            })
            .collect();
        assert_eq!(
            lit,
            vec![Some(1), Some(2), None, Some(3), Some(4), None, None]
        );
        assert_eq!(events.borrow().len(), 2 * tree.len());
        assert!(tree.nodes().iter().all(|&id| !tree.node(id).unwrap().highlighted));
    }

    #[test]
    fn traversal_of_nothing_is_a_no_op() {
        let mut tree = Tree::empty();
        let (mut animator, events) = recording_animator();

        traversal_highlight(&mut tree, None, &mut animator).unwrap();

        assert!(events.borrow().is_empty());
    }

    #[test]
    fn pulses_hold_for_the_delay() {
        let mut tree = tree_from_leaves(2, 2, &[1, 2]);
        let mut animator = Animator::new(Duration::from_millis(5));

        let started = std::time::Instant::now();
        let root = tree.root_id();
        traversal_highlight(&mut tree, root, &mut animator).unwrap();

        assert!(started.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn subscribers_receive_every_event() {
        let mut tree = tree_from_leaves(1, 1, &[7]);
        let root = tree.root_id().unwrap();
        let count = Rc::new(RefCell::new(0));
        let mut subscribers = Subscribers::new();
        for _ in 0..2 {
            let count = Rc::clone(&count);
            subscribers.subscribe(move |_, _| *count.borrow_mut() += 1);
        }

        subscribers
            .notify(&mut tree, SearchEvent::Settled { node: root, value: 7 })
            .unwrap();

        assert_eq!(subscribers.len(), 2);
        assert_eq!(*count.borrow(), 2);
    }
}
