//! Render types as text for diagnostics and hover output.
//!
//! Follows the surface syntax users write: `T[]` for arrays, `Box<number>`
//! for generic instances, `(a: number, b?: string) => void` for function
//! types and `{ x: number; }` for anonymous object types.

use crate::flags::LinkKind;
use crate::graph::SymbolGraph;
use crate::ids::SymbolId;
use tsg_common::{DepthCounter, RecursionProfile};

pub struct TypeFormatter<'a> {
    graph: &'a SymbolGraph,
    depth: DepthCounter,
    /// Render type parameter lists of generic roots as `T extends C`.
    use_constraint: bool,
    /// Names are qualified only up to (and excluding) this container.
    scope: Option<SymbolId>,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(graph: &'a SymbolGraph) -> Self {
        Self {
            graph,
            depth: DepthCounter::with_profile(RecursionProfile::Formatting),
            use_constraint: false,
            scope: None,
        }
    }

    #[must_use]
    pub fn with_constraints(mut self, use_constraint: bool) -> Self {
        self.use_constraint = use_constraint;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: Option<SymbolId>) -> Self {
        self.scope = scope;
        self
    }

    pub fn format(&mut self, ty: SymbolId) -> String {
        if !self.depth.enter() {
            return "...".to_string();
        }
        let text = self.format_inner(ty);
        self.depth.leave();
        text
    }

    fn format_inner(&mut self, ty: SymbolId) -> String {
        let graph = self.graph;

        if graph.is_error(ty) {
            return match graph.error_info(ty).and_then(|e| e.delegate) {
                Some(delegate) if delegate != ty => self.format(delegate),
                _ => graph.name(graph.any_type()).to_string(),
            };
        }
        if graph.is_signature(ty) {
            return self.format_signature(ty, true);
        }
        if !graph.is_type(ty) {
            return match graph.type_of(ty) {
                Some(inner) => self.format(inner),
                None => graph.name(graph.any_type()).to_string(),
            };
        }
        if graph.is_primitive(ty) || graph.is_type_parameter(ty) || graph.is_type_variable(ty) {
            return graph.name(ty).to_string();
        }
        if graph.is_array(ty) {
            return self.format_array(ty);
        }

        let root = graph.root_or_self(ty);
        if graph.name(root).is_empty() {
            return self.format_anonymous(ty);
        }

        let mut text = graph.scoped_path(root, self.scope);
        if let Some(args) = graph.type_arguments(ty) {
            let args = args.to_vec();
            text.push_str(&self.format_argument_list(&args));
        } else {
            let params = graph.type_parameters(ty);
            if !params.is_empty() {
                text.push_str(&self.format_parameter_list(&params));
            }
        }
        text
    }

    fn format_array(&mut self, array: SymbolId) -> String {
        let graph = self.graph;
        let Some(element) = graph.array_element_type(array) else {
            return format!("{}[]", graph.name(graph.any_type()));
        };
        let element_text = self.format(element);
        let needs_parens = graph.is_type(element)
            && graph.name(graph.root_or_self(element)).is_empty()
            && graph.members(element).is_empty()
            && graph.call_signatures(element, false).len() + graph.construct_signatures(element, false).len() == 1;
        if needs_parens {
            format!("({element_text})[]")
        } else {
            format!("{element_text}[]")
        }
    }

    /// `<A, B>` for a list of type arguments.
    pub fn format_argument_list(&mut self, args: &[SymbolId]) -> String {
        let rendered: Vec<String> = args.iter().map(|&arg| self.format(arg)).collect();
        format!("<{}>", rendered.join(", "))
    }

    /// `<T, U extends C>` for a list of formal type parameters.
    pub fn format_parameter_list(&mut self, params: &[SymbolId]) -> String {
        let graph = self.graph;
        let rendered: Vec<String> = params
            .iter()
            .map(|&param| {
                let name = graph.name(param).to_string();
                match graph.constraint(param) {
                    Some(constraint) if self.use_constraint => {
                        format!("{name} extends {}", self.format(constraint))
                    }
                    _ => name,
                }
            })
            .collect();
        format!("<{}>", rendered.join(", "))
    }

    fn format_anonymous(&mut self, ty: SymbolId) -> String {
        let graph = self.graph;
        let members = graph.members(ty);
        let calls = graph.call_signatures(ty, false);
        let constructs = graph.construct_signatures(ty, false);
        let indexes = graph.index_signatures(ty, false);

        if members.is_empty() && indexes.is_empty() {
            match (calls.as_slice(), constructs.as_slice()) {
                ([call], []) => return self.format_signature(*call, true),
                ([], [construct]) => {
                    return format!("new {}", self.format_signature(*construct, true));
                }
                _ => {}
            }
        }

        let mut parts = Vec::new();
        for member in members {
            let mut name = graph.name(member).to_string();
            if graph.is_optional(member) {
                name.push('?');
            }
            let ty_text = match graph.member_type(member) {
                Some(member_ty) => self.format(member_ty),
                None => graph.name(graph.any_type()).to_string(),
            };
            parts.push(format!("{name}: {ty_text}; "));
        }
        for call in calls {
            parts.push(format!("{}; ", self.format_signature(call, false)));
        }
        for construct in constructs {
            parts.push(format!("new {}; ", self.format_signature(construct, false)));
        }
        for index in indexes {
            parts.push(format!("{}; ", self.format_index_signature(index)));
        }

        if parts.is_empty() {
            "{}".to_string()
        } else {
            format!("{{ {}}}", parts.concat())
        }
    }

    /// `<U>(a: number, b?: string, ...rest: T[]) => R` in arrow form,
    /// `(a: number): R` in member form.
    pub fn format_signature(&mut self, signature: SymbolId, arrow: bool) -> String {
        let graph = self.graph;
        let mut text = String::new();

        let own_params = graph.type_parameters(signature);
        if !own_params.is_empty() {
            text.push_str(&self.format_parameter_list(&own_params));
        }

        text.push_str(&self.format_parameters(signature));

        let ret = match graph.return_type(signature) {
            Some(ret) => self.format(ret),
            None => graph.name(graph.well_known().void).to_string(),
        };
        if arrow {
            text.push_str(" => ");
        } else {
            text.push_str(": ");
        }
        text.push_str(&ret);
        text
    }

    fn format_index_signature(&mut self, signature: SymbolId) -> String {
        let graph = self.graph;
        let params = self.format_parameter_items(signature);
        let ret = match graph.return_type(signature) {
            Some(ret) => self.format(ret),
            None => graph.name(graph.any_type()).to_string(),
        };
        format!("[{}]: {ret}", params.join(", "))
    }

    fn format_parameters(&mut self, signature: SymbolId) -> String {
        format!("({})", self.format_parameter_items(signature).join(", "))
    }

    fn format_parameter_items(&mut self, signature: SymbolId) -> Vec<String> {
        let graph = self.graph;
        graph
            .outgoing_targets(signature, LinkKind::Parameter)
            .into_iter()
            .map(|param| {
                let mut name = String::new();
                if graph.is_variadic(param) {
                    name.push_str("...");
                }
                name.push_str(graph.name(param));
                if graph.is_optional(param) {
                    name.push('?');
                }
                let ty_text = match graph.type_of(param) {
                    Some(ty) => self.format(ty),
                    None => graph.name(graph.any_type()).to_string(),
                };
                format!("{name}: {ty_text}")
            })
            .collect()
    }
}
