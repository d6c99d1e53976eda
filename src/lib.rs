//! Survivor and parent selection for multi-objective evolutionary search.
//!
//! Decides which candidates of a generation survive, which become parents,
//! and how fitness is adjusted to keep the population diverse:
//!
//! - **Population**: candidates with normalized objectives, Pareto rank,
//!   crowding distance and metadata, plus a bounded population container.
//! - **Pareto**: dominance, fast non-dominated sorting and per-front
//!   crowding distance.
//! - **Crowding**: NSGA-II environmental selection, truncation by crowding
//!   distance and boundary identification.
//! - **Elite**: standard, frontier-preserving and diversity-aware elitism.
//! - **Tournament**: Pareto, diversity and adaptive-size tournaments with
//!   an injected random generator.
//! - **Sharing**: niche counts, niche radius strategies and
//!   diversity-triggered fitness sharing.
//!
//! All objectives are maximized: higher normalized values are better.
//! Operations take candidates by slice and return annotated copies.
//!
//! # Architecture
//!
//! The crate holds no evaluation or variation logic. An orchestrator
//! evaluates and normalizes candidates, then calls into this crate once per
//! generation:
//!
//! ```text
//! evaluate → normalize → pareto::assign_ranks → crowding::environmental_selection
//!          → elite::select → tournament::select → (variation, next generation)
//! ```
//!
//! # Example
//!
//! ```
//! use u_evoselect::crowding::environmental_selection;
//! use u_evoselect::population::Candidate;
//!
//! let pop: Vec<Candidate> = [(0.9, 0.1), (0.5, 0.5), (0.1, 0.9), (0.2, 0.2)]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &(q, s))| {
//!         Candidate::new(format!("v{i}"), 0)
//!             .with_normalized_objectives([("quality", q), ("speed", s)])
//!     })
//!     .collect();
//!
//! let survivors = environmental_selection(&pop, 3).unwrap();
//! assert_eq!(survivors.len(), 3);
//! assert!(survivors.iter().all(|c| c.pareto_rank == Some(1)));
//! ```

pub mod crowding;
pub mod elite;
pub mod error;
pub mod pareto;
pub mod population;
pub mod sharing;
pub mod tournament;

pub use error::{SelectionError, SelectionResult};
