//! Traits describing read-only combat data.
//!
//! Oracles expose action definitions, item definitions and the random
//! source. The [`Env`] aggregate bundles them so the stat model and the
//! attack resolver can reach everything they need without hard coupling to
//! concrete implementations.
mod actions;
mod actors;
mod catalog;
mod error;
mod items;
mod rng;

pub use actions::ActionOracle;
pub use actors::{CharacterTemplate, NpcId, NpcTemplate};
pub use catalog::Catalog;
pub use error::OracleError;
pub use items::{EquipRequirement, ItemDefinition, ItemId, ItemOracle, StatBonus};
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};

/// Aggregates read-only oracles required by combat resolution.
#[derive(Debug)]
pub struct Env<'a, A, I, R>
where
    A: ActionOracle + ?Sized,
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    actions: Option<&'a A>,
    items: Option<&'a I>,
    rng: Option<&'a R>,
}

// Derived Clone/Copy would require the oracles themselves to be Clone.
impl<A, I, R> Clone for Env<'_, A, I, R>
where
    A: ActionOracle + ?Sized,
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, I, R> Copy for Env<'_, A, I, R>
where
    A: ActionOracle + ?Sized,
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<'a, dyn ActionOracle + 'a, dyn ItemOracle + 'a, dyn RngOracle + 'a>;

impl<'a, A, I, R> Env<'a, A, I, R>
where
    A: ActionOracle + ?Sized,
    I: ItemOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(actions: Option<&'a A>, items: Option<&'a I>, rng: Option<&'a R>) -> Self {
        Self {
            actions,
            items,
            rng,
        }
    }

    pub fn with_all(actions: &'a A, items: &'a I, rng: &'a R) -> Self {
        Self::new(Some(actions), Some(items), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            actions: None,
            items: None,
            rng: None,
        }
    }

    /// Returns the ActionOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ActionsNotAvailable` if no actions oracle was provided.
    pub fn actions(&self) -> Result<&'a A, OracleError> {
        self.actions.ok_or(OracleError::ActionsNotAvailable)
    }

    /// Returns the ItemOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ItemsNotAvailable` if no items oracle was provided.
    pub fn items(&self) -> Result<&'a I, OracleError> {
        self.items.ok_or(OracleError::ItemsNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, A, I, R> Env<'a, A, I, R>
where
    A: ActionOracle + 'a,
    I: ItemOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let actions: Option<&'a dyn ActionOracle> = self.actions.map(|actions| actions as _);
        let items: Option<&'a dyn ItemOracle> = self.items.map(|items| items as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(actions, items, rng)
    }
}

impl<'a> GameEnv<'a> {
    /// Bundles one catalog as both action and item oracle.
    pub fn from_catalog(catalog: &'a Catalog, rng: &'a dyn RngOracle) -> Self {
        let actions: &'a dyn ActionOracle = catalog;
        let items: &'a dyn ItemOracle = catalog;
        Self::new(Some(actions), Some(items), Some(rng))
    }
}
