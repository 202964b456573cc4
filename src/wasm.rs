//! WebAssembly bindings.
//!
//! One handle per problem domain. Configuration and problem are passed as
//! plain JS objects and converted with `serde-wasm-bindgen`; statistics and
//! population are returned the same way. Errors surface as JS strings.

use crate::engine::{Solver, SolverConfig};
use crate::functions::FunctionProblem;
use crate::queens::QueensProblem;
use wasm_bindgen::prelude::*;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

macro_rules! solver_handle {
    ($(#[$meta:meta])* $name:ident, $problem:ty) => {
        $(#[$meta])*
        #[wasm_bindgen]
        pub struct $name {
            solver: Solver<$problem>,
        }

        #[wasm_bindgen]
        impl $name {
            #[wasm_bindgen(constructor)]
            pub fn new(config: JsValue, problem: JsValue) -> Result<$name, JsValue> {
                let config: SolverConfig = serde_wasm_bindgen::from_value(config).map_err(to_js)?;
                let problem: $problem = serde_wasm_bindgen::from_value(problem).map_err(to_js)?;
                let solver = Solver::new(problem, config).map_err(to_js)?;
                Ok($name { solver })
            }

            pub fn initialize(&mut self) -> Result<(), JsValue> {
                self.solver.initialize().map_err(to_js)
            }

            pub fn step(&mut self) -> Result<(), JsValue> {
                self.solver.step().map_err(to_js)
            }

            /// Steps up to `steps` generations, stopping early at a terminal
            /// state. Returns the state name.
            pub fn advance(&mut self, steps: usize) -> Result<String, JsValue> {
                for _ in 0..steps {
                    if self.solver.state().is_terminal() {
                        break;
                    }
                    self.solver.step().map_err(to_js)?;
                }
                Ok(self.solver.state().to_string())
            }

            #[wasm_bindgen(getter)]
            pub fn state(&self) -> String {
                self.solver.state().to_string()
            }

            #[wasm_bindgen(getter, js_name = currentGeneration)]
            pub fn current_generation(&self) -> Option<usize> {
                self.solver.current_generation()
            }

            #[wasm_bindgen(getter)]
            pub fn statistics(&self) -> Result<JsValue, JsValue> {
                serde_wasm_bindgen::to_value(&self.solver.statistics()).map_err(to_js)
            }

            #[wasm_bindgen(getter)]
            pub fn population(&self) -> Result<JsValue, JsValue> {
                serde_wasm_bindgen::to_value(self.solver.population()).map_err(to_js)
            }
        }
    };
}

solver_handle!(
    /// Eight-queens solver exposed to JavaScript.
    QueensSolverHandle,
    QueensProblem
);

solver_handle!(
    /// Benchmark-function solver exposed to JavaScript.
    FunctionSolverHandle,
    FunctionProblem
);
