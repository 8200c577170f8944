//! Call and operator resolution.
//!
//! Overloads are ranked by the summed [`AssignRule::cost`] of binding each
//! argument; the unique cheapest candidate wins. Operator overloads are
//! matched exactly first, then with class operands widened to ancestors.

use crate::{
    AssignRule, FunctionEntry, OperatorEntry, OverloadError, ParamMode, Param, TypeId, TypeSystem,
};

/// Cost of binding `arg` to `param`, or `None` if it cannot bind.
fn binding_cost(system: &TypeSystem, param: &Param, arg: TypeId) -> Option<u32> {
    match param.mode {
        // A `var` argument aliases the parameter, so it must have its exact type.
        ParamMode::Var => system.pool().equals(arg, param.ty).then_some(0),
        ParamMode::Value | ParamMode::Const | ParamMode::Lazy => {
            system.assign_rule(arg, param.ty).map(AssignRule::cost)
        }
    }
}

impl TypeSystem {
    /// Total cost of calling `entry` with `args`, or `None` if it does not apply.
    pub fn call_cost(&self, entry: &FunctionEntry, args: &[TypeId]) -> Option<u32> {
        if !entry.decl.accepts_arity(args.len()) {
            return None;
        }
        entry
            .decl
            .params
            .iter()
            .zip(args)
            .map(|(param, &arg)| binding_cost(self, param, arg))
            .sum()
    }

    /// Pick the overload of a global function that best fits `args`.
    #[tracing::instrument(level = "trace", skip(self, args), fields(argc = args.len()))]
    pub fn resolve_call(&self, name: &str, args: &[TypeId]) -> Result<&FunctionEntry, OverloadError> {
        self.pick_overload(name, self.functions().lookup(name), args)
    }

    /// Pick the overload of `unit.name` that best fits `args`.
    #[tracing::instrument(level = "trace", skip(self, args), fields(argc = args.len()))]
    pub fn resolve_qualified_call(
        &self,
        unit: &str,
        name: &str,
        args: &[TypeId],
    ) -> Result<&FunctionEntry, OverloadError> {
        self.pick_overload(name, self.functions().lookup_qualified(unit, name), args)
    }

    fn pick_overload<'a>(
        &self,
        name: &str,
        candidates: &'a [FunctionEntry],
        args: &[TypeId],
    ) -> Result<&'a FunctionEntry, OverloadError> {
        if candidates.is_empty() {
            return Err(OverloadError::Unknown {
                name: name.to_owned(),
            });
        }

        let mut best: Option<(u32, &FunctionEntry)> = None;
        let mut ties = 0;
        for entry in candidates {
            let Some(cost) = self.call_cost(entry, args) else {
                continue;
            };
            tracing::trace!(name, cost, arity = entry.arity(), "overload candidate");
            match best {
                Some((best_cost, _)) if cost > best_cost => {}
                Some((best_cost, _)) if cost == best_cost => ties += 1,
                _ => {
                    best = Some((cost, entry));
                    ties = 1;
                }
            }
        }

        match best {
            None => Err(OverloadError::NoMatch {
                name: name.to_owned(),
            }),
            Some((_, entry)) if ties == 1 => Ok(entry),
            Some(_) => Err(OverloadError::Ambiguous {
                name: name.to_owned(),
                candidates: ties,
            }),
        }
    }

    /// Names an operand can be matched under, with their widening distance.
    ///
    /// A class operand offers its own name and every ancestor; anything
    /// else offers only its display name.
    fn operand_names(&self, operand: TypeId) -> Vec<String> {
        let own = self.pool().display_name(operand);
        let Some(class) = self.pool().class(operand) else {
            return vec![own];
        };
        match self.classes().lookup_hierarchy(&class.name) {
            Some(chain) if !chain.is_empty() => chain.into_iter().map(|c| c.name.clone()).collect(),
            _ => vec![own],
        }
    }

    /// Find the operator overload for `operands`.
    ///
    /// An exact signature wins. Otherwise class operands are widened to
    /// their ancestors, trying combinations in order of increasing total
    /// distance; ties go to the combination that widens the earlier operand
    /// least.
    #[tracing::instrument(level = "trace", skip(self, operands), fields(arity = operands.len()))]
    pub fn resolve_operator(&self, operator: &str, operands: &[TypeId]) -> Option<&OperatorEntry> {
        if self.operators().operators_for(operator).is_empty() {
            return None;
        }

        let names: Vec<Vec<String>> = operands.iter().map(|&t| self.operand_names(t)).collect();
        let exact: Vec<&str> = names.iter().filter_map(|n| n.first().map(String::as_str)).collect();
        if let Some(entry) = self.operators().lookup(operator, &exact) {
            return Some(entry);
        }

        let mut combos = distance_combinations(&names);
        combos.sort_by(|a, b| {
            let total = |c: &[usize]| c.iter().sum::<usize>();
            total(a).cmp(&total(b)).then_with(|| a.cmp(b))
        });

        combos.into_iter().skip(1).find_map(|combo| {
            let signature: Vec<&str> = combo
                .iter()
                .zip(&names)
                .map(|(&d, n)| n[d].as_str())
                .collect();
            let found = self.operators().lookup(operator, &signature);
            if found.is_some() {
                tracing::trace!(operator, ?signature, "operator matched after widening");
            }
            found
        })
    }
}

/// Every choice of one index per operand, as index vectors.
fn distance_combinations(names: &[Vec<String>]) -> Vec<Vec<usize>> {
    names.iter().fold(vec![Vec::new()], |acc, options| {
        acc.iter()
            .flat_map(|prefix| {
                (0..options.len()).map(move |d| {
                    let mut next = prefix.clone();
                    next.push(d);
                    next
                })
            })
            .collect()
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
