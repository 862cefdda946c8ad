use osm_spatial::{BoundingBox, MemoryRTree, RTreeConfig, SpatialResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Runs a test against a freshly built context, then verifies the tree's
/// structural invariants whether or not the test body touched it.
pub fn run_test<T, B>(before: B, test: T)
where
    B: Fn() -> SpatialResult<TestContext>,
    T: Fn(&mut TestContext) -> SpatialResult<()>,
{
    let mut ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    if let Err(e) = test(&mut ctx) {
        panic!("Test failed: {:?}", e);
    }

    let report = ctx.tree().check_integrity();
    if !report.is_valid {
        for error in &report.errors {
            log::error!("{}", error);
        }
        panic!("After run failed: {} integrity errors", report.errors.len());
    }
}

pub struct TestContext {
    tree: MemoryRTree<String>,
    rng: StdRng,
}

impl TestContext {
    pub fn new(tree: MemoryRTree<String>, seed: u64) -> Self {
        Self {
            tree,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn tree(&self) -> &MemoryRTree<String> {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut MemoryRTree<String> {
        &mut self.tree
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// A random box inside `extent` no larger than `max_size` per side.
    pub fn random_box(&mut self, extent: f64, max_size: f64) -> BoundingBox {
        random_box(&mut self.rng, extent, max_size)
    }
}

pub fn random_box(rng: &mut impl Rng, extent: f64, max_size: f64) -> BoundingBox {
    let x = rng.gen_range(0.0..extent);
    let y = rng.gen_range(0.0..extent);
    let w = rng.gen_range(0.0..=max_size);
    let h = rng.gen_range(0.0..=max_size);
    BoundingBox::new(x, y, x + w, y + h)
}

pub fn create_test_context() -> SpatialResult<TestContext> {
    Ok(TestContext::new(MemoryRTree::new(), 42))
}

pub fn create_small_fanout_context() -> SpatialResult<TestContext> {
    let config = RTreeConfig::new().with_max_children(4).with_min_children(2);
    Ok(TestContext::new(MemoryRTree::with_config(config)?, 7))
}

pub fn create_fanout_context(max_children: usize, min_children: usize, seed: u64) -> SpatialResult<TestContext> {
    Ok(TestContext::new(MemoryRTree::with_fanout(max_children, min_children)?, seed))
}

pub fn tag(i: usize) -> String {
    format!("feature-{}", i)
}
