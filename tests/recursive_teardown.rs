use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};

use bepu_collidables::physics::collidables::{
    CompoundChild, Shape, ShapeBatch, ShapePools, Shapes, Sphere, TypedIndex,
};
use bepu_collidables::physics::RigidPose;
use bepu_collidables::utilities::BoundingBox;
use glam::Quat;

thread_local! {
    static EVENTS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

fn record(event: String) {
    EVENTS.with(|events| events.borrow_mut().push(event));
}

fn take_events() -> Vec<String> {
    EVENTS.with(|events| std::mem::take(&mut *events.borrow_mut()))
}

#[derive(Default)]
struct Leaf {
    name: &'static str,
}

impl Shape for Leaf {
    const TYPE_ID: usize = 20;

    fn compute_bounds(&self, _orientation: Quat, _shapes: &Shapes) -> BoundingBox {
        BoundingBox::default()
    }

    fn dispose(&mut self, _pools: &mut ShapePools) {
        record(format!("dispose {}", self.name));
        if self.name == "faulty" {
            panic!("leaf {} failed to dispose", self.name);
        }
    }
}

#[derive(Default)]
struct Assembly {
    name: &'static str,
    parts: Vec<CompoundChild>,
}

impl Shape for Assembly {
    const TYPE_ID: usize = 21;
    const COMPOUND: bool = true;

    fn compute_bounds(&self, _orientation: Quat, _shapes: &Shapes) -> BoundingBox {
        BoundingBox::default()
    }

    fn dispose(&mut self, _pools: &mut ShapePools) {
        record(format!("dispose {}", self.name));
    }

    fn children(&self) -> &[CompoundChild] {
        &self.parts
    }
}

fn child(shape_index: TypedIndex) -> CompoundChild {
    CompoundChild::new(&RigidPose::IDENTITY, shape_index)
}

#[test]
fn children_are_disposed_once_before_parent() {
    take_events();
    let mut shapes = Shapes::new(4);
    let left = shapes.add(Leaf { name: "left" });
    let right = shapes.add(Leaf { name: "right" });
    let parent = shapes.add(Assembly {
        name: "parent",
        parts: vec![child(left), child(right)],
    });

    shapes.recursively_remove_and_dispose(parent);

    assert_eq!(
        take_events(),
        vec!["dispose left", "dispose right", "dispose parent"]
    );
    assert_eq!(shapes.get(Leaf::TYPE_ID).id_pool().available_id_count(), 2);
    assert_eq!(shapes.get(Assembly::TYPE_ID).id_pool().available_id_count(), 1);

    // The most recently freed leaf slot comes back first.
    assert_eq!(shapes.add(Leaf { name: "next" }), right);
    assert_eq!(shapes.add(Leaf { name: "after" }), left);
    let reused = shapes.add(Assembly {
        name: "again",
        parts: Vec::new(),
    });
    assert_eq!(reused, parent);
}

#[test]
fn remove_and_dispose_leaves_children_alone() {
    take_events();
    let mut shapes = Shapes::new(4);
    let leaf = shapes.add(Leaf { name: "kept" });
    let parent = shapes.add(Assembly {
        name: "parent",
        parts: vec![child(leaf)],
    });

    shapes.remove_and_dispose(parent);

    assert_eq!(take_events(), vec!["dispose parent"]);
    assert_eq!(shapes.get(Leaf::TYPE_ID).id_pool().available_id_count(), 0);
    assert_eq!(shapes.get_shape::<Leaf>(leaf).name, "kept");
}

#[test]
fn remove_skips_disposal() {
    take_events();
    let mut shapes = Shapes::new(4);
    let leaf = shapes.add(Leaf { name: "quiet" });
    shapes.remove(leaf);
    assert!(take_events().is_empty());
    assert_eq!(shapes.get(Leaf::TYPE_ID).id_pool().available_id_count(), 1);
}

#[test]
fn sibling_batches_are_untouched() {
    take_events();
    let mut shapes = Shapes::new(4);
    let sphere = shapes.add(Sphere::new(2.0));
    let leaf = shapes.add(Leaf { name: "only" });
    let parent = shapes.add(Assembly {
        name: "parent",
        parts: vec![child(leaf)],
    });

    shapes.recursively_remove_and_dispose(parent);

    assert_eq!(shapes.get_shape::<Sphere>(sphere).radius, 2.0);
    assert_eq!(shapes.get(Sphere::ID).id_pool().available_id_count(), 0);
    assert_eq!(shapes.registered_type_span(), Assembly::TYPE_ID + 1);
}

#[test]
fn panicking_disposal_keeps_batches_registered() {
    take_events();
    let mut shapes = Shapes::new(4);
    let leaf = shapes.add(Leaf { name: "faulty" });
    let parent = shapes.add(Assembly {
        name: "parent",
        parts: vec![child(leaf)],
    });

    let result = catch_unwind(AssertUnwindSafe(|| {
        shapes.recursively_remove_and_dispose(parent)
    }));

    assert!(result.is_err());
    assert_eq!(take_events(), vec!["dispose faulty"]);
    assert!(shapes.try_get(Leaf::TYPE_ID).is_ok());
    assert!(shapes.try_get(Assembly::TYPE_ID).is_ok());
    assert_eq!(shapes.get_shape::<Assembly>(parent).name, "parent");
}
