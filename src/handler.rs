use std::any::Any;

/// Values captured during a walk, in path order. Query captures are appended
/// after terminal selection.
pub(crate) type CaptureStack = Vec<Box<dyn Any + Send + Sync>>;

/// Type-level tuple extension: `Append<T>` for `(A, B)` is `(A, B, T)`.
/// Each capturing pattern extension grows the argument tuple through this
/// trait, which is what ties a pattern's capture sequence to its handler's
/// parameter list.
pub trait Append<T> {
    type Out;
}

/// Reassembles the typed argument tuple from the dynamic capture stack. The
/// downcasts are guaranteed by construction: the stack was produced by the
/// decoders named in the same pattern that fixed `Self`.
pub trait FromCaptures: Sized {
    fn from_captures(captures: Vec<Box<dyn Any + Send + Sync>>) -> Option<Self>;
}

/// A route handler taking the pattern's decoded captures as `Args`.
///
/// Implemented for `Fn` closures and functions of arity 0 through 8; the
/// parameter list must structurally equal the pattern's capture tuple, so a
/// mismatched handler fails to compile at route construction.
pub trait Handler<Args>: Send + Sync + 'static {
    type Output;

    fn call(&self, args: Args) -> Self::Output;
}

macro_rules! impl_tuples {
    ($( [$($ty:ident),*] ),+ $(,)?) => {$(
        impl<T $(, $ty)*> Append<T> for ($($ty,)*) {
            type Out = ($($ty,)* T,);
        }

        impl<$($ty: Send + Sync + 'static,)*> FromCaptures for ($($ty,)*) {
            #[allow(unused_mut, unused_variables)]
            fn from_captures(captures: Vec<Box<dyn Any + Send + Sync>>) -> Option<Self> {
                let mut iter = captures.into_iter();
                let args = ($(*iter.next()?.downcast::<$ty>().ok()?,)*);
                if iter.next().is_some() {
                    return None;
                }
                Some(args)
            }
        }

        impl<F, R $(, $ty)*> Handler<($($ty,)*)> for F
        where
            F: Fn($($ty),*) -> R + Send + Sync + 'static,
        {
            type Output = R;

            #[allow(non_snake_case)]
            fn call(&self, ($($ty,)*): ($($ty,)*)) -> R {
                (self)($($ty),*)
            }
        }
    )+};
}

impl_tuples!(
    [],
    [A1],
    [A1, A2],
    [A1, A2, A3],
    [A1, A2, A3, A4],
    [A1, A2, A3, A4, A5],
    [A1, A2, A3, A4, A5, A6],
    [A1, A2, A3, A4, A5, A6, A7],
    [A1, A2, A3, A4, A5, A6, A7, A8],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_captures_rebuilds_the_tuple_in_order() {
        let stack: CaptureStack = vec![
            Box::new("bikal".to_string()),
            Box::new(123456_isize),
            Box::new(true),
        ];
        let (name, n, b) = <(String, isize, bool)>::from_captures(stack).unwrap();
        assert_eq!(name, "bikal");
        assert_eq!(n, 123456);
        assert!(b);
    }

    #[test]
    fn from_captures_rejects_wrong_arity() {
        let stack: CaptureStack = vec![Box::new(1_isize)];
        assert!(<(isize, isize)>::from_captures(stack).is_none());
        let stack: CaptureStack = vec![Box::new(1_isize), Box::new(2_isize)];
        assert!(<(isize,)>::from_captures(stack).is_none());
    }

    #[test]
    fn from_captures_rejects_wrong_type() {
        let stack: CaptureStack = vec![Box::new(1_isize)];
        assert!(<(String,)>::from_captures(stack).is_none());
    }

    #[test]
    fn handlers_apply_in_declared_order() {
        let h = |a: isize, b: String| format!("{a}-{b}");
        assert_eq!(Handler::call(&h, (7, "x".to_string())), "7-x");

        let zero = || "fixed";
        assert_eq!(Handler::call(&zero, ()), "fixed");
    }
}
