//! Integration tests for builtin dispatch across the four subject contexts.

use loctext::interpreter::BuiltinResult;
use loctext::{
    Character, Gender, Item, Language, LanguageFlag, Store, Subject, Value, unknown_function,
};

struct Npc {
    index: usize,
    name: &'static str,
    base_name: &'static str,
    gender: Gender,
    visible: bool,
}

impl Npc {
    fn player() -> Self {
        Npc {
            index: 0,
            name: "Ash the Wanderer",
            base_name: "Ash",
            gender: Gender::Male,
            visible: true,
        }
    }

    fn new(name: &'static str, base_name: &'static str, gender: Gender) -> Self {
        Npc {
            index: 7,
            name,
            base_name,
            gender,
            visible: true,
        }
    }
}

impl Character for Npc {
    fn index(&self) -> usize {
        self.index
    }

    fn name(&self) -> String {
        self.name.to_string()
    }

    fn base_name(&self) -> String {
        self.base_name.to_string()
    }

    fn gender(&self) -> Gender {
        self.gender
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

struct Stack {
    count: i64,
    name: &'static str,
}

impl Item for Stack {
    fn index(&self) -> usize {
        3
    }

    fn id(&self) -> u32 {
        42
    }

    fn count(&self) -> i64 {
        self.count
    }

    fn name(&self) -> String {
        self.name.to_string()
    }

    fn base_name(&self) -> String {
        "rock".to_string()
    }
}

const RESOURCES: &str = r#"
locale {
    greet   = "${you()} wake up.${space_if_needed()}"
    arrive  = "${name(_1)} ${is(_1)} here."
    attack  = "${he(_1)} swing${s(_1)} ${his(_1)} sword at ${him(_1)}${himself(_1)}."
    plain   = "${he2(_1)}/${his2(_1)}/${him2(_1)}"
    catch   = "${name(_1)} catch${s(_1, true)} it and ${have(_1)} it."
    owned   = "${his_owned(_1)} bag, ${name_nojob(_1)}, ${basename(_1)}"
    topic   = "${kare_wa(_1)}走った。"
    heavy   = "${name(_1)} ${is(_1)} heavy and ${does(_1)} not move. ${basename(_1)}${s(_1)}"
    go      = "${_1}: go${s(_1, true)}, ${is(_1)}"
    unknown = "a ${frobnicate()} b"
}
"#;

fn store_in(language: Language) -> Store {
    let mut store = Store::builder()
        .language(LanguageFlag::new(language))
        .build();
    store.load_str("builtins.hcl", RESOURCES).unwrap();
    store
}

fn english() -> Store {
    store_in(Language::English)
}

fn japanese() -> Store {
    store_in(Language::Japanese)
}

// =========================================================================
// Argless context
// =========================================================================

#[test]
fn argless_in_english() {
    assert_eq!(
        english().lookup("core.locale.greet", Subject::None),
        "you wake up. "
    );
}

#[test]
fn argless_in_japanese() {
    assert_eq!(
        japanese().lookup("core.locale.greet", Subject::None),
        "あなた wake up."
    );
}

#[test]
fn unknown_function_renders_placeholder() {
    let text = english().lookup("core.locale.unknown", Subject::None);
    assert_eq!(text, "a <unknown function (frobnicate)> b");
    assert!(text.contains("frobnicate"));
    assert_eq!(unknown_function("x"), "<unknown function (x)>");
}

#[test]
fn character_builtin_is_unknown_without_a_character() {
    assert_eq!(
        english().lookup("core.locale.arrive", Subject::None),
        "<unknown function (name)> <unknown function (is)> here."
    );
}

// =========================================================================
// Boolean context
// =========================================================================

#[test]
fn boolean_true_reads_as_the_addressee() {
    assert_eq!(
        english().lookup("core.locale.go", Subject::Bool(true)),
        "true: go, are"
    );
}

#[test]
fn boolean_false_reads_as_third_person() {
    assert_eq!(
        english().lookup("core.locale.go", Subject::Bool(false)),
        "false: goes, is"
    );
}

// =========================================================================
// Character context
// =========================================================================

#[test]
fn player_is_second_person() {
    let player = Npc::player();
    let store = english();
    assert_eq!(
        store.lookup("core.locale.arrive", Subject::from(&player)),
        "you are here."
    );
    assert_eq!(
        store.lookup("core.locale.attack", Subject::from(&player)),
        "you swing your sword at youyourself."
    );
    assert_eq!(
        store.lookup("core.locale.catch", Subject::from(&player)),
        "you catch it and have it."
    );
    assert_eq!(
        store.lookup("core.locale.owned", Subject::from(&player)),
        "your bag, Ash, Ash"
    );
}

#[test]
fn npc_is_third_person_by_gender() {
    let store = english();
    let she = Npc::new("Lomias the Guard", "Lomias", Gender::Female);
    let he = Npc::new("Larnneire", "Larnneire", Gender::Male);

    assert_eq!(
        store.lookup("core.locale.attack", Subject::from(&she)),
        "she swings her sword at herherself."
    );
    assert_eq!(
        store.lookup("core.locale.attack", Subject::from(&he)),
        "he swings his sword at himhimself."
    );
    assert_eq!(
        store.lookup("core.locale.catch", Subject::from(&she)),
        "Lomias the Guard catches it and has it."
    );
    assert_eq!(
        store.lookup("core.locale.owned", Subject::from(&she)),
        "Lomias the Guard's bag, Lomias, Lomias"
    );
}

#[test]
fn invisible_npc_is_something() {
    let store = english();
    let hidden = Npc {
        visible: false,
        ..Npc::new("Ghost", "Ghost", Gender::Female)
    };
    assert_eq!(
        store.lookup("core.locale.arrive", Subject::from(&hidden)),
        "something is here."
    );
    assert_eq!(
        store.lookup("core.locale.attack", Subject::from(&hidden)),
        "it swings its sword at ititself."
    );
    assert_eq!(
        store.lookup("core.locale.plain", Subject::from(&hidden)),
        "she/her/her"
    );
}

#[test]
fn english_only_builtins_are_unknown_in_japanese() {
    let store = japanese();
    let she = Npc::new("ロミアス", "ロミアス", Gender::Female);
    assert_eq!(
        store.lookup("core.locale.attack", Subject::from(&she)),
        "<unknown function (he)> swing<unknown function (s)> \
         <unknown function (his)> sword at <unknown function (him)>\
         <unknown function (himself)>."
    );
}

#[test]
fn japanese_pronouns() {
    let store = japanese();
    let she = Npc::new("ロミアス", "ロミアス", Gender::Female);
    let he = Npc::new("ラーネイレ", "ラーネイレ", Gender::Male);
    let player = Npc::player();

    assert_eq!(
        store.lookup("core.locale.plain", Subject::from(&she)),
        "彼女/彼女の/彼女"
    );
    assert_eq!(
        store.lookup("core.locale.plain", Subject::from(&he)),
        "彼/彼の/彼"
    );
    assert_eq!(
        store.lookup("core.locale.plain", Subject::from(&player)),
        "あなた/あなたの/あなた"
    );
}

#[test]
fn japanese_topic_marker() {
    let store = japanese();
    let she = Npc::new("ロミアス", "ロミアス", Gender::Female);
    assert_eq!(
        store.lookup("core.locale.topic", Subject::from(&she)),
        "ロミアスは走った。"
    );
    assert_eq!(
        store.lookup("core.locale.topic", Subject::from(&Npc::player())),
        "走った。"
    );
}

#[test]
fn japanese_only_builtin_is_unknown_in_english() {
    let she = Npc::new("Lomias", "Lomias", Gender::Female);
    assert_eq!(
        english().lookup("core.locale.topic", Subject::from(&she)),
        "<unknown function (kare_wa)>走った。"
    );
}

#[test]
fn language_is_read_at_each_lookup() {
    let flag = LanguageFlag::new(Language::English);
    let mut store = Store::builder().language(flag.clone()).build();
    store.load_str("builtins.hcl", RESOURCES).unwrap();
    let she = Npc::new("Lomias", "Lomias", Gender::Female);

    assert!(
        store
            .lookup("core.locale.topic", Subject::from(&she))
            .starts_with("<unknown")
    );
    flag.set(Language::Japanese);
    assert_eq!(
        store.lookup("core.locale.topic", Subject::from(&she)),
        "Lomiasは走った。"
    );
}

// =========================================================================
// Item context
// =========================================================================

#[test]
fn single_item_agreement() {
    let rock = Stack {
        count: 1,
        name: "a rock",
    };
    assert_eq!(
        english().lookup("core.locale.heavy", Subject::Item(&rock)),
        "a rock is heavy and does not move. rocks"
    );
}

#[test]
fn plural_item_agreement() {
    let store = english();
    for count in [0, 2, 17] {
        let rocks = Stack {
            count,
            name: "some rocks",
        };
        assert_eq!(
            store.lookup("core.locale.heavy", Subject::Item(&rocks)),
            "some rocks are heavy and do not move. rock"
        );
    }
}

#[test]
fn item_verbs_are_english_only() {
    let rock = Stack {
        count: 1,
        name: "石",
    };
    assert_eq!(
        japanese().lookup("core.locale.heavy", Subject::Item(&rock)),
        "石 <unknown function (is)> heavy and <unknown function (does)> not move. \
         rock<unknown function (s)>"
    );
}

// =========================================================================
// Nesting, coercion and custom builtins
// =========================================================================

fn shout(args: &[Value], _language: Language) -> BuiltinResult {
    Ok(args
        .iter()
        .map(|arg| arg.to_string().to_uppercase())
        .collect::<Vec<_>>()
        .join(" "))
}

fn bang(args: &[Value], _language: Language) -> BuiltinResult {
    Ok(format!("{}!", args.first().map(Value::to_string).unwrap_or_default()))
}

#[test]
fn nested_calls_evaluate_inner_first() {
    let mut store = Store::new();
    store.builtins_mut().argless.insert_universal("shout", shout);
    store.builtins_mut().argless.insert_universal("bang", bang);
    store
        .load_str(
            "nested.hcl",
            r#"locale {
                wrapped = "${shout(${bang(you())}, 2)}"
                bare    = "${bang(shout("hey", you()))}"
            }"#,
        )
        .unwrap();

    assert_eq!(store.lookup("core.locale.wrapped", Subject::None), "YOU! 2");
    assert_eq!(store.lookup("core.locale.bare", Subject::None), "HEY YOU!");
}

#[test]
fn failed_coercion_renders_placeholder_for_outer_call() {
    let mut store = Store::new();
    store
        .load_str(
            "coerce.hcl",
            r#"locale {
                bad  = "go${s(_1, you())}"
                good = "go${s(_1, "true")}"
            }"#,
        )
        .unwrap();

    assert_eq!(
        store.lookup("core.locale.bad", Subject::Bool(false)),
        "go<unknown function (s)>"
    );
    assert_eq!(store.lookup("core.locale.good", Subject::Bool(false)), "goes");
}

#[test]
fn language_specific_builtin_overrides_universal() {
    fn loud_you(_args: &[Value], _language: Language) -> BuiltinResult {
        Ok("YOU".to_string())
    }

    let flag = LanguageFlag::new(Language::English);
    let mut store = Store::builder().language(flag.clone()).build();
    store
        .builtins_mut()
        .argless
        .insert(Language::Japanese, "you", loud_you);
    store
        .load_str("override.hcl", r#"locale { a = "${you()}" }"#)
        .unwrap();

    assert_eq!(store.lookup("core.locale.a", Subject::None), "you");
    flag.set(Language::Japanese);
    assert_eq!(store.lookup("core.locale.a", Subject::None), "YOU");
}
