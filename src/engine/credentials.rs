/// Host capability for choosing an API key.
///
/// When the host offers none, a credential is assumed to be configured.
pub trait KeySelector {
    fn has_selected_api_key(&self) -> bool;

    /// Asks the host to select a key. Returns the key when one was chosen.
    fn open_select_key(&mut self) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    Ready,
    NeedsSelection,
}

/// Decides whether generation may start.
pub struct KeyGate<S: KeySelector> {
    selector: Option<S>,
}

impl<S: KeySelector> KeyGate<S> {
    pub fn new(selector: Option<S>) -> Self {
        Self { selector }
    }

    pub fn selector_mut(&mut self) -> Option<&mut S> {
        self.selector.as_mut()
    }

    pub fn status(&self) -> KeyStatus {
        match &self.selector {
            None => KeyStatus::Ready,
            Some(s) if s.has_selected_api_key() => KeyStatus::Ready,
            Some(_) => KeyStatus::NeedsSelection,
        }
    }

    /// Without a selector there is nothing to open.
    pub fn open_select_key(&mut self) -> Option<String> {
        self.selector.as_mut().and_then(|s| s.open_select_key())
    }
}

/// Desktop stand-in for the host bridge: the key typed into the key screen,
/// held for this session only.
#[derive(Debug, Default)]
pub struct SessionKeySelector {
    pending: String,
    selected: Option<String>,
}

impl SessionKeySelector {
    pub fn new(pending: impl Into<String>) -> Self {
        Self {
            pending: pending.into(),
            selected: None,
        }
    }

    pub fn pending_mut(&mut self) -> &mut String {
        &mut self.pending
    }

    /// Forgets an accepted key so the gate asks again.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

impl KeySelector for SessionKeySelector {
    fn has_selected_api_key(&self) -> bool {
        self.selected.is_some()
    }

    fn open_select_key(&mut self) -> Option<String> {
        let key = self.pending.trim().to_string();
        if key.is_empty() {
            return None;
        }
        self.pending.clear();
        self.selected = Some(key.clone());
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_selector_means_ready() {
        let mut gate = KeyGate::<SessionKeySelector>::new(None);
        assert_eq!(gate.status(), KeyStatus::Ready);
        assert_eq!(gate.open_select_key(), None);
    }

    #[test]
    fn selector_gates_until_a_key_is_chosen() {
        let mut gate = KeyGate::new(Some(SessionKeySelector::new("  ")));
        assert_eq!(gate.status(), KeyStatus::NeedsSelection);
        assert_eq!(gate.open_select_key(), None);
        assert_eq!(gate.status(), KeyStatus::NeedsSelection);

        if let Some(selector) = gate.selector_mut() {
            selector.pending_mut().push_str("typed-later");
        }
        assert_eq!(gate.open_select_key().as_deref(), Some("typed-later"));

        let mut gate = KeyGate::new(Some(SessionKeySelector::new(" key-123 ")));
        assert_eq!(gate.open_select_key().as_deref(), Some("key-123"));
        assert_eq!(gate.status(), KeyStatus::Ready);

        if let Some(selector) = gate.selector_mut() {
            selector.clear_selection();
        }
        assert_eq!(gate.status(), KeyStatus::NeedsSelection);
    }
}
