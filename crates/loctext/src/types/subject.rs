use std::fmt::{Debug, Formatter, Result as FmtResult};

/// Grammatical gender used for pronoun builtins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

/// A character-like entity owned by the host game.
///
/// The player is the addressee of every message: builtins render it in the
/// second person ("you", "your").
pub trait Character {
    /// Identifying index. Index 0 is the player.
    fn index(&self) -> usize;

    /// Display name, including any title.
    fn name(&self) -> String;

    /// Base name without title.
    fn base_name(&self) -> String;

    fn gender(&self) -> Gender;

    fn is_player(&self) -> bool {
        self.index() == 0
    }

    /// Whether the player can currently see this character.
    fn is_visible(&self) -> bool {
        true
    }

    /// Name with the job or title stripped.
    fn name_without_job(&self) -> String {
        self.base_name()
    }
}

/// An item-like entity owned by the host game.
pub trait Item {
    /// Identifying index of this stack.
    fn index(&self) -> usize;

    /// Item type id.
    fn id(&self) -> u32;

    /// Stack size.
    fn count(&self) -> i64;

    /// Display name, including count and identification state.
    fn name(&self) -> String;

    /// Original (base) name of the item type.
    fn base_name(&self) -> String;
}

/// The value a lookup is parameterized with.
#[derive(Clone, Copy, Default)]
pub enum Subject<'a> {
    #[default]
    None,
    Bool(bool),
    Character(&'a dyn Character),
    Item(&'a dyn Item),
}

/// Which builtin table a subject selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectKind {
    None,
    Bool,
    Character,
    Item,
}

impl SubjectKind {
    pub const ALL: [SubjectKind; 4] = [
        SubjectKind::None,
        SubjectKind::Bool,
        SubjectKind::Character,
        SubjectKind::Item,
    ];
}

impl Subject<'_> {
    pub fn kind(&self) -> SubjectKind {
        match self {
            Subject::None => SubjectKind::None,
            Subject::Bool(_) => SubjectKind::Bool,
            Subject::Character(_) => SubjectKind::Character,
            Subject::Item(_) => SubjectKind::Item,
        }
    }
}

impl Debug for Subject<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Subject::None => f.write_str("None"),
            Subject::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Subject::Character(chara) => f
                .debug_struct("Character")
                .field("index", &chara.index())
                .finish(),
            Subject::Item(item) => f
                .debug_struct("Item")
                .field("index", &item.index())
                .field("id", &item.id())
                .finish(),
        }
    }
}

impl From<bool> for Subject<'_> {
    fn from(value: bool) -> Self {
        Subject::Bool(value)
    }
}

impl<'a, C: Character> From<&'a C> for Subject<'a> {
    fn from(chara: &'a C) -> Self {
        Subject::Character(chara)
    }
}
