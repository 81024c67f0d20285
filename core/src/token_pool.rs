use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Dense handle for an interned token string.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u32);

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Interns token strings so the diff engines work on `u32` handles.
///
/// Equal strings always intern to the same id, which makes exact-mode
/// comparison an id comparison. A [`crate::DiffReport`] snapshots the pool's
/// string table so it stays resolvable after the pool is gone.
#[derive(Debug, Default)]
pub struct TokenPool {
    tokens: Vec<String>,
    index: FxHashMap<String, TokenId>,
}

impl TokenPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, s: &str) -> TokenId {
        if let Some(&id) = self.index.get(s) {
            return id;
        }
        let id = TokenId(self.tokens.len() as u32);
        self.tokens.push(s.to_owned());
        self.index.insert(s.to_owned(), id);
        id
    }

    pub fn intern_seq<S: AsRef<str>>(&mut self, tokens: &[S]) -> Vec<TokenId> {
        tokens.iter().map(|t| self.intern(t.as_ref())).collect()
    }

    pub fn resolve(&self, id: TokenId) -> &str {
        &self.tokens[id.0 as usize]
    }

    pub fn strings(&self) -> &[String] {
        &self.tokens
    }

    pub fn into_strings(self) -> Vec<String> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
