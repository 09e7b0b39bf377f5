//! Callables
//!
//! A [`Callable`] is a named function over dynamic values together with its
//! explicit [`Signature`]. Callables are built either from a raw body plus a
//! hand-written signature, or from a typed closure via [`IntoCallable`],
//! which derives the signature from the closure's parameter and return types
//! at compile time.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value_objects::{FromValue, Returns, Shape, Shaped, Signature, Value};

/// Function body of a callable
pub type CallableBody = dyn Fn(Vec<Value>) -> Result<Value> + Send + Sync;

/// A named, signature-carrying function over [`Value`]s
#[derive(Clone)]
pub struct Callable {
    name: Arc<str>,
    signature: Arc<Signature>,
    body: Arc<CallableBody>,
}

impl Callable {
    /// Build a callable from a raw body and an explicit signature
    ///
    /// Variadic tails reach `body` packed into one trailing [`Value::List`].
    pub fn new<F>(name: impl Into<String>, signature: Signature, body: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            signature: Arc::new(signature),
            body: Arc::new(body),
        }
    }

    /// Build a callable from a typed closure
    ///
    /// ```
    /// use cradle_domain::{Callable, Shape, Value};
    ///
    /// let shout = Callable::from_fn("shout", |text: String| text.to_uppercase());
    /// assert_eq!(shout.signature().params(), &[Shape::Str]);
    /// assert_eq!(shout.call(vec!["hi".into()]).unwrap(), Value::from("HI"));
    /// ```
    pub fn from_fn<Args, F: IntoCallable<Args>>(name: impl Into<String>, function: F) -> Self {
        let name: Arc<str> = Arc::from(name.into());
        Self {
            signature: Arc::new(F::signature()),
            body: function.into_body(Arc::clone(&name)),
            name,
        }
    }

    /// Name used in error messages
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared signature
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Invoke with already-resolved arguments
    ///
    /// Expects one value per fixed parameter plus, for variadic callables,
    /// one packed list.
    pub fn call(&self, args: Vec<Value>) -> Result<Value> {
        let expected = self.signature.fixed_arity() + usize::from(self.signature.is_variadic());
        if args.len() != expected {
            return Err(Error::invocation(
                self.name(),
                format!("expected {expected} argument(s) but got {}", args.len()),
            ));
        }
        (self.body)(args)
    }

    /// Whether both callables share the same body
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("signature", &self.signature.to_string())
            .finish()
    }
}

/// A typed closure convertible into a [`Callable`]
///
/// Implemented for `Fn` closures of up to six parameters whose parameter
/// types implement [`FromValue`] + [`Shaped`] and whose return type
/// implements [`Returns`]. `Args` is the parameter tuple and only serves to
/// keep the per-arity implementations apart.
pub trait IntoCallable<Args>: Send + Sync + 'static {
    /// Signature derived from the parameter and return types
    fn signature() -> Signature;

    /// Type-erased body converting dynamic arguments to typed ones
    fn into_body(self, name: Arc<str>) -> Arc<CallableBody>;
}

/// Build a signature from `(shape, is_variadic)` parameter descriptions
///
/// Only a variadic marker in last position makes the signature variadic; in
/// any other position it is an ordinary list parameter.
pub fn signature_from_params(mut params: Vec<(Shape, bool)>) -> Signature {
    let variadic = match params.last() {
        Some((_, true)) => params.pop().map(|(shape, _)| shape),
        _ => None,
    };

    let fixed = params
        .into_iter()
        .map(|(shape, is_variadic)| if is_variadic { Shape::list(shape) } else { shape })
        .collect();

    let signature = Signature::new(fixed);
    match variadic {
        Some(element) => signature.with_variadic(element),
        None => signature,
    }
}

macro_rules! impl_into_callable {
    ($($arg:ident),*) => {
        impl<Func, Ret, $($arg,)*> IntoCallable<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Ret + Send + Sync + 'static,
            Ret: Returns,
            $($arg: FromValue + Shaped,)*
        {
            fn signature() -> Signature {
                signature_from_params(vec![$(($arg::shape(), $arg::VARIADIC)),*])
                    .with_returns(Ret::shapes())
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn into_body(self, name: Arc<str>) -> Arc<CallableBody> {
                Arc::new(move |args: Vec<Value>| {
                    let mut args = args.into_iter();
                    $(let $arg = $arg::from_value(args.next().unwrap_or_default())?;)*
                    (self)($($arg),*).into_value(&name)
                })
            }
        }
    };
}

impl_into_callable!();
impl_into_callable!(A1);
impl_into_callable!(A1, A2);
impl_into_callable!(A1, A2, A3);
impl_into_callable!(A1, A2, A3, A4);
impl_into_callable!(A1, A2, A3, A4, A5);
impl_into_callable!(A1, A2, A3, A4, A5, A6);
