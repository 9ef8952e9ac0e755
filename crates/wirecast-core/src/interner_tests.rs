use crate::Interner;

#[test]
fn equal_names_share_a_symbol() {
    let mut interner = Interner::new();

    let a = interner.intern("vla__u32_3");
    let b = interner.intern_owned(format!("vla__{}_{}", "u32", 3));
    let c = interner.intern("optional__u32");

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.len(), 2);
    assert_eq!(interner.resolve(b), "vla__u32_3");
}

#[test]
fn lookup_does_not_intern() {
    let mut interner = Interner::new();
    let boom = interner.intern("boom");

    assert_eq!(interner.lookup("boom"), Some(boom));
    assert_eq!(interner.lookup("thing"), None);
    assert_eq!(interner.len(), 1);
}

#[test]
fn empty_interner() {
    let interner = Interner::new();

    assert!(interner.is_empty());
    assert_eq!(interner.lookup(""), None);
}
