//! Statement execution.
//!
//! The executor walks statement lists depth-first, mutating the single
//! symbol table and emitting one or more frames per statement. Nested
//! bodies (branches, loop bodies, function bodies) run against the same
//! table, so variables declared inside them stay visible afterwards.

pub mod expr;

use pseudo_ir::{LoopRange, Node, NodeKind, Operator};

use crate::clock::Clock;
use crate::compiler::TraceConfig;
use crate::condition::{condition_text, negate_condition, render_condition};
use crate::emitter::FrameEmitter;
use crate::errors::{invalid_operand, unsupported_node, TraceError, TraceResult};
use crate::frame::{Action, ActionFrame, LoopKind};
use crate::stack::ensure_sufficient_stack;
use crate::symbol_table::SymbolTable;
use crate::value::{Value, ValueType};

use expr::{evaluate, evaluate_condition, evaluate_number};

/// How a statement list finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Next,
    /// A `return` ran; unwind to the enclosing function or the program.
    Return,
}

/// Executes one program. Owns all state for a single trace.
pub(crate) struct Executor<'cfg> {
    table: SymbolTable,
    emitter: FrameEmitter,
    config: &'cfg TraceConfig,
}

impl<'cfg> Executor<'cfg> {
    pub(crate) fn new(config: &'cfg TraceConfig, clock: Clock) -> Self {
        Executor {
            table: SymbolTable::new(),
            emitter: FrameEmitter::new(clock),
            config,
        }
    }

    /// Run the whole program and hand back its frames.
    pub(crate) fn run(mut self, program: &[Node]) -> TraceResult<Vec<ActionFrame>> {
        self.exec_block(program)?;
        tracing::debug!(variables = self.table.len(), "program finished");
        Ok(self.emitter.finish())
    }

    fn exec_block(&mut self, body: &[Node]) -> TraceResult<Flow> {
        for stmt in body {
            if self.exec_stmt(stmt)? == Flow::Return {
                return Ok(Flow::Return);
            }
        }
        Ok(Flow::Next)
    }

    fn exec_stmt(&mut self, node: &Node) -> TraceResult<Flow> {
        ensure_sufficient_stack(|| match &node.kind {
            NodeKind::VariableDeclaration { name, value } => {
                self.exec_declaration(node.line, name, value)?;
                Ok(Flow::Next)
            }
            NodeKind::PrintStatement { value } => {
                self.exec_print(node.line, value)?;
                Ok(Flow::Next)
            }
            NodeKind::IfStatement {
                condition,
                consequent,
                alternate,
            } => self.exec_if(node.line, condition, consequent, alternate.as_deref()),
            NodeKind::LoopUntil { condition, body } => {
                self.exec_loop_until(node.line, condition, body)
            }
            NodeKind::LoopFromTo {
                loop_variable,
                range,
                body,
            } => self.exec_loop_from_to(node.line, loop_variable, range, body),
            NodeKind::FunctionDeclaration { name, params, body } => {
                self.exec_function(node.line, name, params, body)?;
                Ok(Flow::Next)
            }
            NodeKind::ReturnStatement { value } => {
                self.emitter.emit(
                    node.line,
                    Action::Return {
                        value: condition_text(value),
                    },
                );
                Ok(Flow::Return)
            }
            NodeKind::Expression { .. }
            | NodeKind::Identifier { .. }
            | NodeKind::NumberLiteral { .. }
            | NodeKind::StringLiteral { .. }
            | NodeKind::BooleanLiteral { .. }
            | NodeKind::LengthExpression { .. }
            | NodeKind::SubstringExpression { .. }
            | NodeKind::Unsupported { .. } => Err(unsupported_node(node.kind.name())),
        })
    }

    fn exec_declaration(&mut self, line: Option<u32>, name: &str, value: &Node) -> TraceResult<()> {
        let value = evaluate(value, &self.table)?;
        self.set(line, name, value);
        Ok(())
    }

    /// Store `value` and emit its `set` frame.
    fn set(&mut self, line: Option<u32>, name: &str, value: Value) {
        let ty = value.value_type();
        self.table.declare(name, value.clone());
        self.emitter.emit(
            line,
            Action::Set {
                var_name: name.to_string(),
                ty,
                value,
            },
        );
    }

    fn exec_print(&mut self, line: Option<u32>, value: &Node) -> TraceResult<()> {
        let action = match &value.kind {
            NodeKind::Identifier { name } if self.table.contains(name) => Action::Print {
                is_literal: false,
                var_name: Some(name.clone()),
                literal: self.table.get(name)?.value.clone().into_primitive(),
            },
            // An unknown name is printed as text, not reported.
            NodeKind::Identifier { name } => Action::Print {
                is_literal: true,
                var_name: None,
                literal: Value::String(name.clone()),
            },
            _ => Action::Print {
                is_literal: true,
                var_name: None,
                literal: evaluate(value, &self.table)?.into_primitive(),
            },
        };
        self.emitter.emit(line, action);
        Ok(())
    }

    fn exec_if(
        &mut self,
        line: Option<u32>,
        condition: &Node,
        consequent: &[Node],
        alternate: Option<&[Node]>,
    ) -> TraceResult<Flow> {
        let result = evaluate_condition(condition, &self.table)?;
        let outer = self.emitter.open_block();
        self.emitter.emit(
            line,
            Action::If {
                condition: condition_text(condition),
                result,
            },
        );

        let flow = match (result, alternate) {
            (true, _) => self.exec_block(consequent)?,
            (false, Some(alternate)) => self.exec_block(alternate)?,
            (false, None) => Flow::Next,
        };

        self.emitter.close_block(outer, Action::Endif);
        Ok(flow)
    }

    fn exec_loop_until(&mut self, line: Option<u32>, until: &Node, body: &[Node]) -> TraceResult<Flow> {
        let condition = negate_condition(until);
        let text = condition_text(&condition);
        let outer = self.emitter.open_block();
        self.emitter.emit(
            line,
            Action::While {
                condition: text.clone(),
            },
        );

        let mut iterations = 0;
        let flow = loop {
            let result = evaluate_condition(&condition, &self.table)?;
            self.emitter.emit(
                line,
                Action::If {
                    condition: text.clone(),
                    result,
                },
            );
            if !result {
                break Flow::Next;
            }
            self.check_iterations(iterations, line)?;
            iterations += 1;

            if self.exec_block(body)? == Flow::Return {
                break Flow::Return;
            }
        };

        tracing::debug!(condition = %text, iterations, "while loop finished");
        self.emitter.close_block(
            outer,
            Action::LoopEnd {
                kind: LoopKind::While,
            },
        );
        Ok(flow)
    }

    fn exec_loop_from_to(
        &mut self,
        line: Option<u32>,
        variable: &str,
        range: &LoopRange,
        body: &[Node],
    ) -> TraceResult<Flow> {
        let start = evaluate_number(&range.start, &self.table, "from_to")?;
        let outer = self.emitter.open_block();
        self.set(line, variable, Value::Number(start));

        let text = render_condition(Operator::LtEq, variable, &condition_text(&range.end));
        self.emitter.emit(
            line,
            Action::LoopFromTo {
                condition: text.clone(),
            },
        );

        let mut iterations = 0;
        let flow = loop {
            let current = self.counter(variable)?;
            let end = evaluate_number(&range.end, &self.table, "from_to")?;
            let result = current <= end;
            self.emitter.emit(
                line,
                Action::If {
                    condition: text.clone(),
                    result,
                },
            );
            if !result {
                break Flow::Next;
            }
            self.check_iterations(iterations, line)?;
            iterations += 1;

            if self.exec_block(body)? == Flow::Return {
                break Flow::Return;
            }

            // The body may have reassigned the counter; step from its
            // current value.
            let next = self.counter(variable)? + 1.0;
            self.set(line, variable, Value::Number(next));
        };

        tracing::debug!(condition = %text, iterations, "from_to loop finished");
        self.emitter.close_block(
            outer,
            Action::LoopEnd {
                kind: LoopKind::FromTo,
            },
        );
        Ok(flow)
    }

    /// Current numeric value of a loop counter.
    fn counter(&self, variable: &str) -> TraceResult<f64> {
        let entry = self.table.get(variable)?;
        match (entry.ty, entry.value.to_number()) {
            (ValueType::Number, Some(n)) => Ok(n),
            _ => Err(invalid_operand(
                "from_to",
                format!("{variable} = {}", entry.value),
            )),
        }
    }

    fn check_iterations(&self, done: usize, line: Option<u32>) -> TraceResult<()> {
        match self.config.max_loop_iterations {
            Some(limit) if done >= limit => Err(TraceError::IterationLimitExceeded {
                limit,
                line: self.emitter.resolve_line(line),
            }),
            _ => Ok(()),
        }
    }

    fn exec_function(
        &mut self,
        line: Option<u32>,
        name: &str,
        params: &[String],
        body: &[Node],
    ) -> TraceResult<()> {
        let define_line = self.emitter.resolve_line(line);
        let stamp = self.emitter.stamp();

        let outer = self.emitter.begin_nested();
        let result = self.exec_block(body);
        let nested = self.emitter.end_nested(outer);
        // A `return` ends the function body only.
        result?;

        self.emitter.emit_stamped(
            define_line,
            stamp,
            Action::Define {
                var_name: name.to_string(),
                params: params.to_vec(),
                body: nested,
            },
        );
        Ok(())
    }
}
