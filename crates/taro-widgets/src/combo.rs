//! Selection state for single- and multi-select comboboxes.
//!
//! [`ComboState`] owns the candidate list, the free-text query, the selected
//! set, and the decision of whether typed text that matches nothing becomes a
//! creatable entry. It is rendering-free: the host (usually
//! [`Combobox`](crate::combobox::Combobox)) feeds it [`ComboEvent`]s and
//! applies the returned [`ComboEffect`]s, so every transition is observable
//! and testable without a terminal.
//!
//! # Example
//!
//! ```ignore
//! use taro_widgets::combo::{ComboEvent, ComboState};
//!
//! let mut combo = ComboState::new(vec!["Red".into(), "Green".into(), "Blue".into()])
//!     .multi();
//!
//! combo.apply(ComboEvent::SetQuery("re".into()));
//! let filtered: Vec<_> = combo.filtered_candidates().collect();  // ["Red"]
//! ```

use crate::item::{
    default_new_item_transform, default_projection, Item, NewItemTransform, Projection,
};
use taro_core::diag::{Advisory, Diagnostics, NullDiagnostics};

/// How many items the selection may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// At most one selected item; committing replaces it.
    #[default]
    Single,
    /// Any number of selected items, insertion-ordered, duplicate-free.
    Multi,
}

/// Who owns the candidate list.
///
/// Chosen once at construction; the engine never re-derives the mode from
/// which callbacks happen to be wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateSource {
    /// The engine owns the list and appends accepted created entries itself.
    #[default]
    Owned,
    /// The host owns the list: accepted created entries surface as
    /// [`ComboEffect::ItemCreated`] and the host replaces the candidates via
    /// [`ComboEvent::ReplaceCandidates`].
    Controlled,
}

/// How removal of a selected item is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Removal {
    /// The engine removes the item and reports the new selection.
    #[default]
    Direct,
    /// The engine only emits [`ComboEffect::RemoveRequested`]; the host
    /// mutates the selection on its own terms.
    Deferred,
}

/// Roving focus position across the selected-item chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Active {
    /// Nothing active (initial state, and after every commit).
    #[default]
    None,
    /// The text input has focus; no chip is active.
    Input,
    /// The chip at this index (within the selection) is active.
    Chip(usize),
}

/// Inputs to the selection state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum ComboEvent {
    /// Replace the free-text query.
    SetQuery(String),
    /// Commit an item into the selection. `None` is absorbed as a no-op.
    Commit(Option<Item>),
    /// Remove an item from the selection (projection equality; absent items
    /// are a no-op).
    Remove(Item),
    /// Move chip focus by a delta, clamped to `[-1, selected_len - 1]` where
    /// `-1` is the input itself. No wraparound.
    MoveActive(isize),
    /// Open the candidate list.
    Open,
    /// Close the candidate list; also resets the query so no stale partial
    /// text lingers after the list loses focus.
    Close,
    /// Full replacement of the candidate list (controlled hosts, resolved
    /// async fetches). Discarding stale fetches is the caller's concern.
    ReplaceCandidates(Vec<Item>),
}

/// Outputs of the selection state machine, applied by the host after each
/// transition.
#[derive(Debug, Clone, PartialEq)]
pub enum ComboEffect {
    /// The query changed; carries the query and the recomputed filtered view.
    InputValueChanged {
        /// The new query text.
        query: String,
        /// Filtered candidates for the new query.
        filtered: Vec<Item>,
    },
    /// A created entry was accepted and normalized. Only emitted for
    /// [`CandidateSource::Controlled`]; the host is expected to fold the item
    /// into its candidate list.
    ItemCreated(Item),
    /// The host asked for deferred removal; the selection was left untouched.
    RemoveRequested(Item),
    /// The selection changed; carries the full selection in display order.
    SelectionChanged(Vec<Item>),
}

/// Selection state machine for a combobox.
///
/// All operations complete synchronously; invalid inputs (a `None` commit,
/// removal of an absent item, an out-of-range focus move) are absorbed as
/// no-ops rather than surfaced as errors.
pub struct ComboState {
    query: String,
    candidates: Vec<Item>,
    selected: Vec<Item>,
    active: Active,
    open: bool,
    mode: SelectionMode,
    source: CandidateSource,
    removal: Removal,
    create_enabled: bool,
    projection: Projection,
    transform: NewItemTransform,
    create_label: Box<dyn Fn(&str) -> String + Send>,
    diagnostics: Box<dyn Diagnostics>,
    advised: bool,
}

impl ComboState {
    /// Create a single-select state over the given candidates, with item
    /// creation enabled and the engine owning the candidate list.
    pub fn new(candidates: Vec<Item>) -> Self {
        Self {
            query: String::new(),
            candidates,
            selected: Vec::new(),
            active: Active::None,
            open: false,
            mode: SelectionMode::Single,
            source: CandidateSource::Owned,
            removal: Removal::Direct,
            create_enabled: true,
            projection: Box::new(default_projection),
            transform: Box::new(default_new_item_transform),
            create_label: Box::new(|query| query.to_string()),
            diagnostics: Box::new(NullDiagnostics),
            advised: false,
        }
    }

    /// Switch to multi-select.
    pub fn multi(mut self) -> Self {
        self.mode = SelectionMode::Multi;
        self
    }

    /// Mark the candidate list as host-controlled.
    pub fn controlled(mut self) -> Self {
        self.source = CandidateSource::Controlled;
        self
    }

    /// Defer removal of selected items to the host.
    pub fn with_deferred_removal(mut self) -> Self {
        self.removal = Removal::Deferred;
        self
    }

    /// Disable the synthetic "create from query" entry.
    pub fn without_creation(mut self) -> Self {
        self.create_enabled = false;
        self
    }

    /// Replace the string projection used for comparison and display.
    pub fn with_projection(mut self, projection: impl Fn(&Item) -> String + Send + 'static) -> Self {
        self.projection = Box::new(projection);
        self
    }

    /// Replace the normalization applied to accepted created entries.
    pub fn with_transform(mut self, transform: impl Fn(Item) -> Item + Send + 'static) -> Self {
        self.transform = Box::new(transform);
        self
    }

    /// Replace the label formatter for the synthetic creatable entry.
    pub fn with_create_label(mut self, format: impl Fn(&str) -> String + Send + 'static) -> Self {
        self.create_label = Box::new(format);
        self
    }

    /// Replace the diagnostics sink.
    pub fn with_diagnostics(mut self, diagnostics: impl Diagnostics + 'static) -> Self {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    // --- Read operations ---

    /// Current free-text query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The full candidate list, unfiltered.
    pub fn candidates(&self) -> &[Item] {
        &self.candidates
    }

    /// The selection in display (insertion) order.
    pub fn selected(&self) -> &[Item] {
        &self.selected
    }

    /// Current roving chip focus.
    pub fn active(&self) -> Active {
        self.active
    }

    /// Whether the candidate list is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The filtered candidate view for the current query.
    ///
    /// A candidate passes when its projection starts with the query
    /// (case-insensitive) and it is not already selected; entries carrying
    /// the creation marker always pass. When creation is eligible (enabled,
    /// non-empty query, no candidate projecting exactly to the query
    /// case-insensitively) a synthetic creatable entry is appended.
    ///
    /// The returned iterator is lazy and restartable — call again to re-scan.
    pub fn filtered_candidates(&self) -> impl Iterator<Item = Item> + '_ {
        let needle = self.query.to_lowercase();
        let base = self.candidates.iter().filter(move |item| {
            item.is_created()
                || (!self.is_selected(item)
                    && (self.projection)(item).to_lowercase().starts_with(&needle))
        });
        base.cloned().chain(self.creatable_entry())
    }

    /// The filtered view collected into a `Vec`.
    pub fn filtered(&self) -> Vec<Item> {
        self.filtered_candidates().collect()
    }

    fn creatable_entry(&self) -> Option<Item> {
        if !self.create_enabled || self.query.is_empty() {
            return None;
        }
        let needle = self.query.to_lowercase();
        let exact_match = self
            .candidates
            .iter()
            .any(|item| (self.projection)(item).to_lowercase() == needle);
        if exact_match {
            return None;
        }
        Some(Item::created(
            self.query.clone(),
            (self.create_label)(&self.query),
        ))
    }

    fn is_selected(&self, item: &Item) -> bool {
        let projected = (self.projection)(item);
        self.selected
            .iter()
            .any(|selected| (self.projection)(selected) == projected)
    }

    // --- Transitions ---

    /// Apply one event, returning the effects for the host to act on.
    pub fn apply(&mut self, event: ComboEvent) -> Vec<ComboEffect> {
        match event {
            ComboEvent::SetQuery(text) => {
                self.query = text;
                vec![self.input_value_changed()]
            }
            ComboEvent::Commit(None) => vec![],
            ComboEvent::Commit(Some(item)) => self.commit(item),
            ComboEvent::Remove(item) => self.remove(item),
            ComboEvent::MoveActive(delta) => {
                self.move_active(delta);
                vec![]
            }
            ComboEvent::Open => {
                self.open = true;
                vec![]
            }
            ComboEvent::Close => {
                self.open = false;
                if self.query.is_empty() {
                    vec![]
                } else {
                    self.query.clear();
                    vec![self.input_value_changed()]
                }
            }
            ComboEvent::ReplaceCandidates(items) => {
                self.candidates = items;
                vec![]
            }
        }
    }

    fn commit(&mut self, item: Item) -> Vec<ComboEffect> {
        let mut effects = Vec::new();

        let item = if item.is_created() {
            if self.source == CandidateSource::Owned && !self.advised {
                self.advised = true;
                self.diagnostics.advise(Advisory::new(
                    "combo.owned-candidates-creation",
                    "created entries are being appended to an engine-owned candidate \
                     list; hosts that allow creation usually control the list and \
                     handle ItemCreated themselves",
                ));
            }
            let normalized = (self.transform)(item.strip_created());
            match self.source {
                CandidateSource::Owned => self.candidates.push(normalized.clone()),
                CandidateSource::Controlled => {
                    effects.push(ComboEffect::ItemCreated(normalized.clone()));
                }
            }
            normalized
        } else {
            item
        };

        if !self.is_selected(&item) {
            match self.mode {
                SelectionMode::Single => self.selected = vec![item],
                SelectionMode::Multi => self.selected.push(item),
            }
            effects.push(ComboEffect::SelectionChanged(self.selected.clone()));
        }

        self.active = Active::None;
        if !self.query.is_empty() {
            self.query.clear();
            effects.push(self.input_value_changed());
        }
        effects
    }

    fn remove(&mut self, item: Item) -> Vec<ComboEffect> {
        let projected = (self.projection)(&item);
        let Some(index) = self
            .selected
            .iter()
            .position(|selected| (self.projection)(selected) == projected)
        else {
            return vec![];
        };

        if self.removal == Removal::Deferred {
            return vec![ComboEffect::RemoveRequested(item)];
        }

        self.selected.remove(index);
        // Keep chip focus within the shrunken selection
        if let Active::Chip(chip) = self.active {
            if self.selected.is_empty() {
                self.active = Active::Input;
            } else if chip >= self.selected.len() {
                self.active = Active::Chip(self.selected.len() - 1);
            }
        }
        vec![ComboEffect::SelectionChanged(self.selected.clone())]
    }

    fn move_active(&mut self, delta: isize) {
        let current = match self.active {
            Active::None | Active::Input => -1,
            Active::Chip(chip) => chip as isize,
        };
        let upper = self.selected.len() as isize - 1;
        let next = (current + delta).clamp(-1, upper.max(-1));
        self.active = if next < 0 {
            Active::Input
        } else {
            Active::Chip(next as usize)
        };
    }

    fn input_value_changed(&self) -> ComboEffect {
        ComboEffect::InputValueChanged {
            query: self.query.clone(),
            filtered: self.filtered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taro_core::diag::CollectDiagnostics;

    fn colors() -> Vec<Item> {
        vec!["Red".into(), "Green".into(), "Blue".into()]
    }

    fn labels(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.label()).collect()
    }

    #[test]
    fn filter_is_prefix_and_case_insensitive() {
        let mut combo = ComboState::new(colors()).without_creation();
        combo.apply(ComboEvent::SetQuery("re".into()));
        assert_eq!(labels(&combo.filtered()), ["Red"]);

        combo.apply(ComboEvent::SetQuery("RE".into()));
        assert_eq!(labels(&combo.filtered()), ["Red"]);

        // substring matches are not prefix matches
        combo.apply(ComboEvent::SetQuery("ree".into()));
        assert!(combo.filtered().is_empty());
    }

    #[test]
    fn filter_preserves_candidate_order() {
        let mut combo =
            ComboState::new(vec!["Beta".into(), "Bravo".into(), "Alpha".into()]).without_creation();
        combo.apply(ComboEvent::SetQuery("b".into()));
        assert_eq!(labels(&combo.filtered()), ["Beta", "Bravo"]);
    }

    #[test]
    fn filter_excludes_selected_items() {
        let mut combo = ComboState::new(colors()).multi().without_creation();
        combo.apply(ComboEvent::Commit(Some(Item::text("Red"))));
        combo.apply(ComboEvent::SetQuery("".into()));
        assert_eq!(labels(&combo.filtered()), ["Green", "Blue"]);
    }

    #[test]
    fn set_query_reports_query_and_filtered_view() {
        let mut combo = ComboState::new(colors()).without_creation();
        let effects = combo.apply(ComboEvent::SetQuery("gr".into()));
        assert_eq!(
            effects,
            vec![ComboEffect::InputValueChanged {
                query: "gr".into(),
                filtered: vec![Item::text("Green")],
            }]
        );
    }

    #[test]
    fn set_query_does_not_touch_selection() {
        let mut combo = ComboState::new(colors()).multi();
        combo.apply(ComboEvent::Commit(Some(Item::text("Red"))));
        combo.apply(ComboEvent::SetQuery("xyz".into()));
        assert_eq!(labels(combo.selected()), ["Red"]);
    }

    #[test]
    fn creation_eligibility_boundary() {
        let mut combo = ComboState::new(vec!["Apple".into(), "Banana".into()]);

        // exact match (case-insensitive) suppresses the creatable entry
        combo.apply(ComboEvent::SetQuery("Apple".into()));
        assert!(combo.filtered().iter().all(|item| !item.is_created()));
        combo.apply(ComboEvent::SetQuery("apple".into()));
        assert!(combo.filtered().iter().all(|item| !item.is_created()));

        // a proper prefix is creatable
        combo.apply(ComboEvent::SetQuery("App".into()));
        let filtered = combo.filtered();
        let creatable = filtered.last().unwrap();
        assert!(creatable.is_created());
        assert_eq!(creatable.label(), "App");

        // the empty query never creates
        combo.apply(ComboEvent::SetQuery("".into()));
        assert!(combo.filtered().iter().all(|item| !item.is_created()));
    }

    #[test]
    fn create_label_formatter_applies() {
        let mut combo =
            ComboState::new(colors()).with_create_label(|query| format!("Create \"{query}\""));
        combo.apply(ComboEvent::SetQuery("Teal".into()));
        let filtered = combo.filtered();
        assert_eq!(filtered.last().unwrap().label(), "Create \"Teal\"");
        assert_eq!(filtered.last().unwrap().value(), "Teal");
    }

    #[test]
    fn disabled_creation_never_synthesizes() {
        let mut combo = ComboState::new(colors()).without_creation();
        combo.apply(ComboEvent::SetQuery("Teal".into()));
        assert!(combo.filtered().is_empty());
    }

    #[test]
    fn commit_none_is_noop() {
        let mut combo = ComboState::new(colors());
        let effects = combo.apply(ComboEvent::Commit(None));
        assert!(effects.is_empty());
        assert!(combo.selected().is_empty());
    }

    #[test]
    fn commit_resets_query_and_active() {
        let mut combo = ComboState::new(colors()).multi();
        combo.apply(ComboEvent::Commit(Some(Item::text("Red"))));
        combo.apply(ComboEvent::MoveActive(1));
        combo.apply(ComboEvent::SetQuery("gr".into()));

        let effects = combo.apply(ComboEvent::Commit(Some(Item::text("Green"))));
        assert_eq!(combo.query(), "");
        assert_eq!(combo.active(), Active::None);
        assert!(effects
            .iter()
            .any(|e| matches!(e, ComboEffect::InputValueChanged { query, .. } if query.is_empty())));
    }

    #[test]
    fn commit_never_duplicates_by_projection() {
        let mut combo = ComboState::new(colors()).multi();
        combo.apply(ComboEvent::Commit(Some(Item::text("Red"))));
        let effects = combo.apply(ComboEvent::Commit(Some(Item::text("Red"))));
        assert_eq!(labels(combo.selected()), ["Red"]);
        // no selection change reported for the duplicate
        assert!(!effects
            .iter()
            .any(|e| matches!(e, ComboEffect::SelectionChanged(_))));
    }

    #[test]
    fn single_mode_commit_replaces() {
        let mut combo = ComboState::new(colors());
        combo.apply(ComboEvent::Commit(Some(Item::text("Red"))));
        combo.apply(ComboEvent::Commit(Some(Item::text("Blue"))));
        assert_eq!(labels(combo.selected()), ["Blue"]);
    }

    #[test]
    fn owned_source_appends_created_items() {
        let mut combo = ComboState::new(colors()).multi();
        combo.apply(ComboEvent::SetQuery("Purple".into()));
        let creatable = combo.filtered().pop().unwrap();
        let effects = combo.apply(ComboEvent::Commit(Some(creatable)));

        assert_eq!(labels(combo.selected()), ["Purple"]);
        assert_eq!(
            labels(combo.candidates()),
            ["Red", "Green", "Blue", "Purple"]
        );
        // owned lists never surface ItemCreated
        assert!(!effects
            .iter()
            .any(|e| matches!(e, ComboEffect::ItemCreated(_))));
    }

    #[test]
    fn controlled_source_emits_item_created() {
        let mut combo = ComboState::new(colors()).multi().controlled();
        combo.apply(ComboEvent::SetQuery("Purple".into()));
        let creatable = combo.filtered().pop().unwrap();
        let effects = combo.apply(ComboEvent::Commit(Some(creatable)));

        assert!(effects.contains(&ComboEffect::ItemCreated(Item::text("Purple"))));
        // the engine does not touch a controlled candidate list
        assert_eq!(labels(combo.candidates()), ["Red", "Green", "Blue"]);
        assert_eq!(labels(combo.selected()), ["Purple"]);
    }

    #[test]
    fn created_commit_applies_transform() {
        let mut combo = ComboState::new(colors())
            .multi()
            .with_transform(|item| Item::entry(item.value().to_lowercase(), item.value().to_string()));
        combo.apply(ComboEvent::SetQuery("Purple".into()));
        let creatable = combo.filtered().pop().unwrap();
        combo.apply(ComboEvent::Commit(Some(creatable)));

        assert_eq!(combo.selected()[0].value(), "purple");
        assert_eq!(combo.selected()[0].label(), "Purple");
    }

    #[test]
    fn owned_creation_advises_once() {
        let sink = CollectDiagnostics::new();
        let mut combo = ComboState::new(colors()).multi().with_diagnostics(sink.clone());

        combo.apply(ComboEvent::SetQuery("Purple".into()));
        let creatable = combo.filtered().pop().unwrap();
        combo.apply(ComboEvent::Commit(Some(creatable)));
        combo.apply(ComboEvent::SetQuery("Teal".into()));
        let creatable = combo.filtered().pop().unwrap();
        combo.apply(ComboEvent::Commit(Some(creatable)));

        assert_eq!(sink.advisories().len(), 1);
        assert!(sink.has("combo.owned-candidates-creation"));
    }

    #[test]
    fn controlled_creation_does_not_advise() {
        let sink = CollectDiagnostics::new();
        let mut combo = ComboState::new(colors())
            .multi()
            .controlled()
            .with_diagnostics(sink.clone());
        combo.apply(ComboEvent::SetQuery("Purple".into()));
        let creatable = combo.filtered().pop().unwrap();
        combo.apply(ComboEvent::Commit(Some(creatable)));
        assert!(sink.advisories().is_empty());
    }

    #[test]
    fn remove_absent_item_is_noop() {
        let mut combo = ComboState::new(colors()).multi();
        combo.apply(ComboEvent::Commit(Some(Item::text("Red"))));
        let effects = combo.apply(ComboEvent::Remove(Item::text("Green")));
        assert!(effects.is_empty());
        assert_eq!(labels(combo.selected()), ["Red"]);
    }

    #[test]
    fn remove_mutates_and_reports() {
        let mut combo = ComboState::new(colors()).multi();
        combo.apply(ComboEvent::Commit(Some(Item::text("Red"))));
        combo.apply(ComboEvent::Commit(Some(Item::text("Green"))));
        let effects = combo.apply(ComboEvent::Remove(Item::text("Red")));
        assert_eq!(effects, vec![ComboEffect::SelectionChanged(vec![Item::text("Green")])]);
    }

    #[test]
    fn deferred_removal_leaves_selection_untouched() {
        let mut combo = ComboState::new(colors()).multi().with_deferred_removal();
        combo.apply(ComboEvent::Commit(Some(Item::text("Red"))));
        let effects = combo.apply(ComboEvent::Remove(Item::text("Red")));
        assert_eq!(effects, vec![ComboEffect::RemoveRequested(Item::text("Red"))]);
        assert_eq!(labels(combo.selected()), ["Red"]);
    }

    #[test]
    fn remove_clamps_chip_focus() {
        let mut combo = ComboState::new(colors()).multi();
        combo.apply(ComboEvent::Commit(Some(Item::text("Red"))));
        combo.apply(ComboEvent::Commit(Some(Item::text("Green"))));
        combo.apply(ComboEvent::MoveActive(2)); // chip 1
        combo.apply(ComboEvent::Remove(Item::text("Green")));
        assert_eq!(combo.active(), Active::Chip(0));
        combo.apply(ComboEvent::Remove(Item::text("Red")));
        assert_eq!(combo.active(), Active::Input);
    }

    #[test]
    fn move_active_clamps_at_both_ends() {
        let mut combo = ComboState::new(colors()).multi();
        for color in ["Red", "Green", "Blue"] {
            combo.apply(ComboEvent::Commit(Some(Item::text(color))));
        }

        combo.apply(ComboEvent::MoveActive(-100));
        assert_eq!(combo.active(), Active::Input);

        combo.apply(ComboEvent::MoveActive(100));
        assert_eq!(combo.active(), Active::Chip(2));
    }

    #[test]
    fn move_active_steps_without_wrap() {
        let mut combo = ComboState::new(colors()).multi();
        combo.apply(ComboEvent::Commit(Some(Item::text("Red"))));
        combo.apply(ComboEvent::Commit(Some(Item::text("Green"))));

        combo.apply(ComboEvent::MoveActive(1));
        assert_eq!(combo.active(), Active::Chip(0));
        combo.apply(ComboEvent::MoveActive(1));
        assert_eq!(combo.active(), Active::Chip(1));
        combo.apply(ComboEvent::MoveActive(-1));
        assert_eq!(combo.active(), Active::Chip(0));
        combo.apply(ComboEvent::MoveActive(-1));
        assert_eq!(combo.active(), Active::Input);
    }

    #[test]
    fn move_active_with_empty_selection_stays_on_input() {
        let mut combo = ComboState::new(colors()).multi();
        combo.apply(ComboEvent::MoveActive(5));
        assert_eq!(combo.active(), Active::Input);
    }

    #[test]
    fn close_resets_query() {
        let mut combo = ComboState::new(colors());
        combo.apply(ComboEvent::Open);
        assert!(combo.is_open());
        combo.apply(ComboEvent::SetQuery("gr".into()));

        let effects = combo.apply(ComboEvent::Close);
        assert!(!combo.is_open());
        assert_eq!(combo.query(), "");
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn close_is_idempotent() {
        let mut combo = ComboState::new(colors());
        combo.apply(ComboEvent::Open);
        combo.apply(ComboEvent::SetQuery("bl".into()));
        combo.apply(ComboEvent::Close);

        let (query, open, selected) =
            (combo.query().to_string(), combo.is_open(), combo.selected().to_vec());
        let effects = combo.apply(ComboEvent::Close);
        assert!(effects.is_empty());
        assert_eq!(combo.query(), query);
        assert_eq!(combo.is_open(), open);
        assert_eq!(combo.selected(), selected);
    }

    #[test]
    fn replace_candidates_swaps_list() {
        let mut combo = ComboState::new(colors()).without_creation();
        combo.apply(ComboEvent::ReplaceCandidates(vec![
            "Cyan".into(),
            "Magenta".into(),
        ]));
        combo.apply(ComboEvent::SetQuery("c".into()));
        assert_eq!(labels(&combo.filtered()), ["Cyan"]);
    }

    #[test]
    fn custom_projection_drives_matching() {
        let mut combo = ComboState::new(vec![
            Item::entry("1", "Ada"),
            Item::entry("2", "Grace"),
        ])
        .without_creation()
        .with_projection(|item| item.value().to_string());

        combo.apply(ComboEvent::SetQuery("1".into()));
        assert_eq!(labels(&combo.filtered()), ["Ada"]);
    }

    // The full multi-select walk-through: filter, commit, create, commit.
    #[test]
    fn multi_select_with_creation_end_to_end() {
        let mut combo = ComboState::new(colors()).multi();

        let effects = combo.apply(ComboEvent::SetQuery("re".into()));
        match &effects[0] {
            ComboEffect::InputValueChanged { filtered, .. } => {
                assert_eq!(labels(filtered), ["Red", "re"]);
            }
            other => panic!("expected InputValueChanged, got {other:?}"),
        }

        combo.apply(ComboEvent::Commit(Some(Item::text("Red"))));
        assert_eq!(labels(combo.selected()), ["Red"]);
        assert_eq!(combo.query(), "");

        combo.apply(ComboEvent::SetQuery("Purple".into()));
        let filtered = combo.filtered();
        assert_eq!(filtered.len(), 1);
        assert!(filtered[0].is_created());
        assert_eq!(filtered[0].label(), "Purple");

        combo.apply(ComboEvent::Commit(Some(filtered[0].clone())));
        assert_eq!(labels(combo.selected()), ["Red", "Purple"]);
        assert!(combo
            .candidates()
            .iter()
            .any(|item| item.label() == "Purple" && !item.is_created()));
    }
}
