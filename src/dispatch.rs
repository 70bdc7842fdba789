//! Static dispatch factory: binds a key set to a list of derived types and,
//! at run time, constructs the one selected by key into its storage cell.
//!
//! Emplacement needs a "conditional on constructor compatibility" check: a
//! branch is a no-op (returns `None`) if the selected derived type isn't
//! constructible from the forwarded arguments. This is the well-known
//! *autoref specialization* idiom — two traits of the same name implemented
//! at different auto-deref depths so that a blanket "not constructible"
//! fallback only wins when the specific `ConstructFrom<Args>` impl does not
//! apply to this `(T, Args)` pair. This is scoped narrowly to "is `T`
//! constructible from `Args`" and is not a reusable introspection layer.

use std::marker::PhantomData;

use crate::cell::HasCell;

/// Implemented by a derived type for each argument shape it can be built
/// from. By-reference vs by-value forwarding falls out naturally: passing
/// `&str` selects the by-reference impl (copy), passing an owned `String`
/// selects the by-value impl (move).
pub trait ConstructFrom<Args> {
    fn construct_from(args: Args) -> Self;
}

/// Associates a derived type with the compile-time constant key extracted
/// for it.
pub trait Keyed<K> {
    const KEY: K;
}

#[doc(hidden)]
pub struct Candidate<T, Args>(PhantomData<fn() -> (T, Args)>);

impl<T, Args> Candidate<T, Args> {
    pub fn new() -> Self {
        Candidate(PhantomData)
    }
}

#[doc(hidden)]
pub trait ViaConstruct<T, Args> {
    fn try_build(&self, args: Args) -> Option<T>;
}

impl<T, Args> ViaConstruct<T, Args> for &&Candidate<T, Args>
where
    T: ConstructFrom<Args>,
{
    fn try_build(&self, args: Args) -> Option<T> {
        Some(T::construct_from(args))
    }
}

#[doc(hidden)]
pub trait ViaNone<T, Args> {
    fn try_build(&self, args: Args) -> Option<T>;
}

impl<T, Args> ViaNone<T, Args> for &Candidate<T, Args> {
    fn try_build(&self, _args: Args) -> Option<T> {
        None
    }
}

/// Attempts to build `T` from `args` and, if successful, replaces `T`'s
/// storage cell with the new instance. Returns `None`, with no cell
/// mutated, when `T` does not implement `ConstructFrom<Args>` — resolved at
/// compile time by [`ViaConstruct`]/[`ViaNone`], not at run time.
pub fn try_construct<T, Args>(args: Args) -> Option<&'static mut T>
where
    T: HasCell,
{
    let built: Option<T> = (&&Candidate::<T, Args>::new()).try_build(args);
    built.map(|v| T::cell().replace(v))
}

/// Declares a dispatch factory binding a `Base` trait object to a
/// declaration-ordered list of derived types, each keyed via [`Keyed`].
/// `emplace` performs: one MPH lookup, one linear `j == i` test chain
/// unrolled at macro-expansion time, one constructor-compatibility test,
/// and at most one placement construction.
#[macro_export]
macro_rules! dispatch_factory {
    (
        $vis:vis $factory:ident {
            base: $base:path,
            key: $key_ty:ty,
            types: [ $( $ty:ty ),+ $(,)? ]
        }
    ) => {
        $vis struct $factory;

        impl $factory {
            fn mph() -> &'static $crate::Mph<$key_ty> {
                static CELL: ::std::sync::OnceLock<$crate::Mph<$key_ty>> = ::std::sync::OnceLock::new();
                CELL.get_or_init(|| {
                    $crate::Mph::build(&[ $( <$ty as $crate::Keyed<$key_ty>>::KEY ),+ ])
                })
            }

            /// Looks up `key`, and — if it is registered and `args` matches
            /// the selected derived type's constructor — constructs it into
            /// its storage cell and returns a `Base` pointer to it.
            /// Otherwise returns `None` with no cell mutated.
            $vis fn emplace<Args>(key: $key_ty, args: Args) -> Option<&'static mut dyn $base> {
                let mph = Self::mph();
                let i = mph.lookup(key);
                if i == mph.sentinel() {
                    return None;
                }
                let mut idx: u32 = 0;
                $(
                    if idx == i {
                        return $crate::dispatch::try_construct::<$ty, Args>(args)
                            .map(|r| r as &'static mut dyn $base);
                    }
                    idx += 1;
                )+
                let _ = idx;
                None
            }
        }

        $(
            $crate::storage_cell!($ty);
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Keyed, dispatch_factory};

    trait Shape {
        fn describe(&self) -> String;
    }

    struct Circle;
    impl Shape for Circle {
        fn describe(&self) -> String {
            "circle".into()
        }
    }
    impl Keyed<u8> for Circle {
        const KEY: u8 = 2;
    }
    impl ConstructFrom<()> for Circle {
        fn construct_from(_: ()) -> Self {
            Circle
        }
    }

    struct Square(i32);
    impl Shape for Square {
        fn describe(&self) -> String {
            format!("square({})", self.0)
        }
    }
    impl Keyed<u8> for Square {
        const KEY: u8 = 5;
    }
    impl ConstructFrom<i32> for Square {
        fn construct_from(side: i32) -> Self {
            Square(side)
        }
    }

    struct Label {
        moved: bool,
        text: String,
    }
    impl Shape for Label {
        fn describe(&self) -> String {
            format!("label({}, moved={})", self.text, self.moved)
        }
    }
    impl Keyed<u8> for Label {
        const KEY: u8 = 7;
    }
    impl ConstructFrom<&str> for Label {
        fn construct_from(s: &str) -> Self {
            Label { moved: false, text: s.to_string() }
        }
    }
    impl ConstructFrom<String> for Label {
        fn construct_from(s: String) -> Self {
            Label { moved: true, text: s }
        }
    }

    dispatch_factory! {
        ShapeFactory {
            base: Shape,
            key: u8,
            types: [Circle, Square, Label],
        }
    }

    #[test]
    fn dispatch_distinct_constructors() {
        let a = ShapeFactory::emplace(2, ()).expect("A constructs");
        assert_eq!(a.describe(), "circle");

        let b = ShapeFactory::emplace(5, 42).expect("B constructs");
        assert_eq!(b.describe(), "square(42)");

        let c = ShapeFactory::emplace(7, "hello").expect("copy-constructs");
        assert_eq!(c.describe(), "label(hello, moved=false)");

        let c = ShapeFactory::emplace(7, String::from("hi")).expect("move-constructs");
        assert_eq!(c.describe(), "label(hi, moved=true)");

        assert!(ShapeFactory::emplace(5, String::from("oops")).is_none());
        assert!(ShapeFactory::emplace(99, ()).is_none());
    }

    #[test]
    fn replacement_sequence_reflects_last_write() {
        ShapeFactory::emplace(5, 10).unwrap();
        ShapeFactory::emplace(5, 20).unwrap();
        ShapeFactory::emplace(5, 30).unwrap();
        let last = ShapeFactory::emplace(5, 40).unwrap();
        assert_eq!(last.describe(), "square(40)");
    }
}
