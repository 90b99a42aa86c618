//! The range-search model: build, query, and persistence.

use distances::number::Float;
use mt_logger::{mt_log, Level};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    search::{dual_tree, naive, single_tree},
    tree::{MidpointSplit, RandomHyperplaneSplit, SplitRule, TwoPointSplit, VantageSplit},
    Bound, BuiltTree, Euclidean, Interval, PointSet, RandomBasis, RangeSearchError, SpatialTree, TreeVariant,
};

/// The build-time options of a [`RangeSearch`] model.
#[derive(Clone, Debug)]
pub struct RangeSearchConfig {
    /// The tree variant to index the reference set with.
    pub tree_variant: TreeVariant,
    /// The maximum number of points in a tree leaf. Must be at least 1.
    pub leaf_size: usize,
    /// Use exhaustive search and build no tree at all.
    pub naive: bool,
    /// Traverse the reference tree once per query instead of building a
    /// second tree over the queries.
    pub single_mode: bool,
    /// Rotate the data through a random orthogonal basis before indexing.
    pub random_basis: bool,
    /// The seed for the random basis and for randomized split rules.
    pub seed: Option<u64>,
}

impl Default for RangeSearchConfig {
    fn default() -> Self {
        Self {
            tree_variant: TreeVariant::default(),
            leaf_size: 20,
            naive: false,
            single_mode: false,
            random_basis: false,
            seed: None,
        }
    }
}

impl RangeSearchConfig {
    /// Checks the option combination before anything is built.
    fn validate(&self) -> Result<(), RangeSearchError> {
        if self.naive && self.single_mode {
            return Err(RangeSearchError::Config(
                "naive and single_mode are mutually exclusive; naive search never builds a tree".to_string(),
            ));
        }
        if self.leaf_size == 0 {
            return Err(RangeSearchError::Config("leaf_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// A built range-search model.
///
/// A model owns the (possibly rotated) reference points, the tree built
/// over them (absent in naive mode), and the options it was built with.
/// It is structurally immutable: queries borrow it read-only, and
/// rebuilding with different options produces a new model.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RangeSearch<F: Float> {
    /// The reference points, rotated if a basis is present.
    data: PointSet<F>,
    /// The reference tree, absent in naive mode.
    tree: Option<BuiltTree<F>>,
    /// The tree variant requested at build time.
    variant: TreeVariant,
    /// The leaf size used at build time.
    leaf_size: usize,
    /// Whether queries run the naive strategy.
    naive: bool,
    /// Whether queries run the single-tree strategy.
    single_mode: bool,
    /// The random basis applied to the data, if any.
    basis: Option<RandomBasis<F>>,
    /// The seed used for randomized split rules and query-tree builds.
    seed: Option<u64>,
    /// The metric all distances are computed under.
    #[serde(skip)]
    metric: Euclidean,
}

impl<F: Float> RangeSearch<F> {
    /// Builds a model over the given reference points.
    ///
    /// This is the only mutating operation in the crate: all validation
    /// happens before the tree is touched, and the returned model never
    /// changes afterwards.
    ///
    /// # Errors
    ///
    /// * If `config` requests both `naive` and `single_mode`.
    /// * If `config.leaf_size` is zero.
    pub fn build(data: PointSet<F>, config: &RangeSearchConfig) -> Result<Self, RangeSearchError> {
        config.validate()?;

        let basis = config
            .random_basis
            .then(|| RandomBasis::new(data.dimensionality(), config.seed));
        let data = match &basis {
            Some(b) => b.project(&data),
            None => data,
        };

        let tree = if config.naive {
            None
        } else {
            mt_log!(
                Level::Debug,
                "Building {} tree over {} points with leaf size {} ...",
                config.tree_variant,
                data.cardinality(),
                config.leaf_size
            );
            Some(BuiltTree::build(&data, config.tree_variant, config.leaf_size, config.seed))
        };

        Ok(Self {
            data,
            tree,
            variant: config.tree_variant,
            leaf_size: config.leaf_size,
            naive: config.naive,
            single_mode: config.single_mode,
            basis,
            seed: config.seed,
            metric: Euclidean,
        })
    }

    /// The reference points the model indexes, after any basis rotation.
    pub fn data(&self) -> &PointSet<F> {
        &self.data
    }

    /// The tree variant requested at build time.
    pub fn variant(&self) -> TreeVariant {
        self.variant
    }

    /// The leaf size used at build time.
    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// Whether queries run the naive strategy.
    pub fn is_naive(&self) -> bool {
        self.naive
    }

    /// Whether queries run the single-tree strategy.
    pub fn is_single_mode(&self) -> bool {
        self.single_mode
    }

    /// The random basis applied to the data, if any.
    pub fn basis(&self) -> Option<&RandomBasis<F>> {
        self.basis.as_ref()
    }

    /// Finds, for every query point, all reference points whose distance
    /// lies inside `interval`.
    ///
    /// With `queries: None` the reference set doubles as the query set
    /// (self-search), and a point is never reported as its own match even
    /// when `0` is inside the interval. Results within a query are sorted
    /// by increasing reference index.
    ///
    /// # Errors
    ///
    /// * If the query points have a different dimensionality than the
    ///   reference points.
    pub fn search(
        &self,
        queries: Option<&PointSet<F>>,
        interval: &Interval<F>,
    ) -> Result<Vec<Vec<(usize, F)>>, RangeSearchError> {
        self.search_impl(queries, interval, false)
    }

    /// Parallel version of [`search`](Self::search), batching queries with
    /// rayon.
    ///
    /// # Errors
    ///
    /// See [`search`](Self::search).
    pub fn par_search(
        &self,
        queries: Option<&PointSet<F>>,
        interval: &Interval<F>,
    ) -> Result<Vec<Vec<(usize, F)>>, RangeSearchError> {
        self.search_impl(queries, interval, true)
    }

    /// The shared body of [`search`](Self::search) and
    /// [`par_search`](Self::par_search).
    fn search_impl(
        &self,
        queries: Option<&PointSet<F>>,
        interval: &Interval<F>,
        par: bool,
    ) -> Result<Vec<Vec<(usize, F)>>, RangeSearchError> {
        if let Some(q) = queries {
            if q.dimensionality() != self.data.dimensionality() {
                return Err(RangeSearchError::Dataset(format!(
                    "query points have {} coordinates but the reference points have {}",
                    q.dimensionality(),
                    self.data.dimensionality()
                )));
            }
        }

        let projected = match (&self.basis, queries) {
            (Some(b), Some(q)) => Some(b.project(q)),
            _ => None,
        };
        let queries = projected.as_ref().or(queries);

        mt_log!(
            Level::Debug,
            "Range search over [{}, {}] for {} queries ...",
            interval.min(),
            interval.max(),
            queries.map_or(self.data.cardinality(), PointSet::cardinality)
        );

        let mut results = self.dispatch(queries, interval, par);
        for row in &mut results {
            row.sort_unstable_by_key(|&(i, _)| i);
        }
        Ok(results)
    }

    /// Runs the strategy selected at build time.
    fn dispatch(&self, queries: Option<&PointSet<F>>, interval: &Interval<F>, par: bool) -> Vec<Vec<(usize, F)>> {
        let self_mode = queries.is_none();
        let query_set = queries.unwrap_or(&self.data);

        if self.naive {
            return if par {
                naive::par_batch_search(&self.data, &self.metric, query_set, interval, self_mode)
            } else {
                naive::batch_search(&self.data, &self.metric, query_set, interval, self_mode)
            };
        }

        let tree = self
            .tree
            .as_ref()
            .unwrap_or_else(|| unreachable!("a non-naive model always builds a tree"));

        if self.single_mode {
            match tree {
                BuiltTree::Kd(t) => self.single_over(t, query_set, interval, self_mode, par),
                BuiltTree::Ball(t) => self.single_over(t, query_set, interval, self_mode, par),
                BuiltTree::Vp(t) => self.single_over(t, query_set, interval, self_mode, par),
                BuiltTree::Rp(t) => self.single_over(t, query_set, interval, self_mode, par),
            }
        } else {
            match tree {
                BuiltTree::Kd(t) => self.dual_over(t, &MidpointSplit, queries, interval, par),
                BuiltTree::Ball(t) => self.dual_over(t, &TwoPointSplit, queries, interval, par),
                BuiltTree::Vp(t) => self.dual_over(t, &VantageSplit, queries, interval, par),
                BuiltTree::Rp(t) => self.dual_over(
                    t,
                    &RandomHyperplaneSplit::new(self.seed.unwrap_or_else(rand::random)),
                    queries,
                    interval,
                    par,
                ),
            }
        }
    }

    /// Runs the single-tree strategy over one tree variant.
    fn single_over<B: Bound<Dist = F>>(
        &self,
        tree: &SpatialTree<B>,
        query_set: &PointSet<F>,
        interval: &Interval<F>,
        self_mode: bool,
        par: bool,
    ) -> Vec<Vec<(usize, F)>> {
        if par {
            single_tree::par_batch_search(&self.data, tree, &self.metric, query_set, interval, self_mode)
        } else {
            single_tree::batch_search(&self.data, tree, &self.metric, query_set, interval, self_mode)
        }
    }

    /// Runs the dual-tree strategy over one tree variant, reusing the
    /// reference tree for the query role in self-search.
    fn dual_over<B: Bound<Dist = F>, S: SplitRule<B>>(
        &self,
        tree: &SpatialTree<B>,
        rule: &S,
        queries: Option<&PointSet<F>>,
        interval: &Interval<F>,
        par: bool,
    ) -> Vec<Vec<(usize, F)>> {
        match queries {
            None => {
                if par {
                    dual_tree::par_search(&self.data, tree, &self.data, tree, &self.metric, interval, true)
                } else {
                    dual_tree::search(&self.data, tree, &self.data, tree, &self.metric, interval, true)
                }
            }
            Some(q) => {
                let query_tree = SpatialTree::new(q, self.leaf_size, rule);
                if par {
                    dual_tree::par_search(&self.data, tree, q, &query_tree, &self.metric, interval, false)
                } else {
                    dual_tree::search(&self.data, tree, q, &query_tree, &self.metric, interval, false)
                }
            }
        }
    }
}

impl<F: Float + Serialize + DeserializeOwned> RangeSearch<F> {
    /// Serializes the model to a self-describing byte stream.
    ///
    /// # Errors
    ///
    /// * If the model cannot be encoded.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RangeSearchError> {
        bincode::serialize(self).map_err(|e| RangeSearchError::Serialization(e.to_string()))
    }

    /// Reconstructs a model from [`to_bytes`](Self::to_bytes) output.
    ///
    /// A reconstructed model answers every query identically to the model
    /// that produced the bytes.
    ///
    /// # Errors
    ///
    /// * If the bytes are corrupt or were produced by an incompatible
    ///   version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RangeSearchError> {
        bincode::deserialize(bytes).map_err(|e| RangeSearchError::Deserialization(e.to_string()))
    }

    /// Writes the serialized model to disk.
    ///
    /// # Errors
    ///
    /// * If the model cannot be encoded.
    /// * If the file cannot be written.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: &P) -> Result<(), RangeSearchError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes).map_err(|e| RangeSearchError::Io(e.to_string()))
    }

    /// Reads a serialized model from disk.
    ///
    /// # Errors
    ///
    /// * If the file cannot be read.
    /// * If the bytes cannot be decoded.
    pub fn load<P: AsRef<std::path::Path>>(path: &P) -> Result<Self, RangeSearchError> {
        let bytes = std::fs::read(path).map_err(|e| RangeSearchError::Io(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}
