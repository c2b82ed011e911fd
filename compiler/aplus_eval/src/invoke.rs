//! Function invocation.
//!
//! Arguments arrive reversed relative to source order: `f{a;b}` is invoked
//! with `[b, a]`, so a built-in's right argument is always first.

use crate::errors::{non_function_error, valence_error, EvalResult};
use crate::runtime::Runtime;
use crate::value::{Callable, Value};

/// Call `function` with reversed `arguments`.
///
/// User functions must receive exactly their declared arity (valence minus
/// the runtime handle). Built-ins take one argument (monadic) or two
/// (dyadic); any other count is a Valence error. Errors from the callee
/// propagate unchanged.
#[tracing::instrument(level = "trace", skip_all, fields(arguments = arguments.len()))]
pub fn invoke(runtime: &mut Runtime, function: &Value, arguments: &[Value]) -> EvalResult {
    let Value::Func(function) = function else {
        return Err(non_function_error(function.type_name()));
    };
    match function.callable() {
        Callable::User(compiled) => {
            if arguments.len() + 1 != function.valence() {
                return Err(valence_error(function.name()));
            }
            compiled.call(runtime, arguments)
        }
        Callable::Monadic(_) | Callable::Dyadic(_) => match arguments {
            [right] => function.call_builtin(runtime, right, None),
            [right, left] => function.call_builtin(runtime, right, Some(left)),
            _ => Err(valence_error(function.name())),
        },
    }
}
