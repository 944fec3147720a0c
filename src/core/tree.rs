//! core::tree
//!
//! The command forest: every command the console understands.
//!
//! # Architecture
//!
//! Commands are declared as a tree of [`CommandDef`] values and registered
//! under an optional namespace label with a [`ForestBuilder`]. Building the
//! forest moves every definition into an arena; nodes are then addressed by
//! [`CommandId`] and inspected through the borrowed [`CommandRef`] handle.
//!
//! Child edges own, parent edges are plain indices used only to rebuild a
//! node's path. The forest is immutable once built.
//!
//! # Invariants
//!
//! - A node is either a leaf (arguments + handler) or a group (children)
//! - A group has at least one child
//! - Sibling names are unique ignoring case; all roots, across every
//!   namespace, form one sibling set
//! - A node's parent is recorded once, when it is attached
//!
//! # Example
//!
//! ```
//! use ecoshell::core::arguments::ArgumentList;
//! use ecoshell::core::tree::{CommandDef, ForestBuilder};
//! use ecoshell::engine::Session;
//!
//! let forest = ForestBuilder::new()
//!     .register(
//!         Some("habits"),
//!         CommandDef::group(
//!             "habit",
//!             "Track habits",
//!             vec![CommandDef::leaf(
//!                 "list",
//!                 "List habits",
//!                 "habit list",
//!                 ArgumentList::empty(),
//!                 |_ctx, _call| Ok(()),
//!             )],
//!         ),
//!     )
//!     .build()?;
//!
//! let session = Session::new();
//! let habit = forest.find_root("HABIT", &session).unwrap();
//! let list = habit.child_by_name("list", &session).unwrap();
//! assert_eq!(list.full_path(), ["habit", "list"]);
//! # Ok::<(), ecoshell::core::types::DefinitionError>(())
//! ```

use std::collections::HashSet;
use std::fmt;

use super::arguments::{ArgumentList, BoundArgs};
use super::types::DefinitionError;
use crate::engine::gate::Authorizer;
use crate::engine::{CommandError, Context};

/// Callback run when a leaf command is dispatched.
///
/// Handlers communicate only through side effects on the context and
/// their own collaborators; an error is reported to the user.
pub type Handler = Box<dyn Fn(&mut Context, &Invocation<'_>) -> anyhow::Result<()>>;

/// Stable index of a node in a [`CommandForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(usize);

/// Declaration of a command before it is registered.
pub struct CommandDef {
    name: String,
    description: String,
    example: Option<String>,
    auth_required: bool,
    body: DefBody,
}

enum DefBody {
    Leaf {
        arguments: ArgumentList,
        handler: Handler,
    },
    Group {
        children: Vec<CommandDef>,
    },
}

impl CommandDef {
    /// Declare a dispatchable command.
    pub fn leaf<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        example: impl Into<String>,
        arguments: ArgumentList,
        handler: F,
    ) -> Self
    where
        F: Fn(&mut Context, &Invocation<'_>) -> anyhow::Result<()> + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            example: Some(example.into()),
            auth_required: false,
            body: DefBody::Leaf {
                arguments,
                handler: Box::new(handler),
            },
        }
    }

    /// Declare a grouping command that only holds sub-commands.
    pub fn group(
        name: impl Into<String>,
        description: impl Into<String>,
        children: Vec<CommandDef>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            example: None,
            auth_required: false,
            body: DefBody::Group { children },
        }
    }

    /// Set the usage example shown in help.
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// Hide and refuse this command while the session is not authorized.
    pub fn auth_required(mut self) -> Self {
        self.auth_required = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CommandDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("CommandDef");
        s.field("name", &self.name)
            .field("auth_required", &self.auth_required);
        match &self.body {
            DefBody::Leaf { arguments, .. } => s.field("arguments", arguments),
            DefBody::Group { children } => s.field("children", children),
        };
        s.finish()
    }
}

/// A registered command.
pub struct CommandNode {
    name: String,
    description: String,
    example: Option<String>,
    auth_required: bool,
    parent: Option<CommandId>,
    body: NodeBody,
}

enum NodeBody {
    Leaf {
        arguments: ArgumentList,
        handler: Handler,
    },
    Group {
        children: Vec<CommandId>,
    },
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("CommandNode");
        s.field("name", &self.name)
            .field("auth_required", &self.auth_required)
            .field("parent", &self.parent);
        match &self.body {
            NodeBody::Leaf { arguments, .. } => s.field("arguments", arguments),
            NodeBody::Group { children } => s.field("children", children),
        };
        s.finish()
    }
}

/// Root commands sharing a namespace label.
#[derive(Debug)]
pub struct Namespace {
    label: Option<String>,
    roots: Vec<CommandId>,
}

impl Namespace {
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// All registered commands.
#[derive(Debug, Default)]
pub struct CommandForest {
    nodes: Vec<CommandNode>,
    namespaces: Vec<Namespace>,
}

impl CommandForest {
    /// Get a handle to a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` came from a different forest.
    pub fn get(&self, id: CommandId) -> CommandRef<'_> {
        assert!(id.0 < self.nodes.len(), "command id from another forest");
        CommandRef { forest: self, id }
    }

    /// Namespaces in registration order.
    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    /// Root commands of one namespace.
    pub fn roots_of<'f>(&'f self, namespace: &'f Namespace) -> impl Iterator<Item = CommandRef<'f>> {
        namespace.roots.iter().map(move |&id| self.get(id))
    }

    /// Every root command, across all namespaces.
    pub fn roots(&self) -> impl Iterator<Item = CommandRef<'_>> {
        self.namespaces
            .iter()
            .flat_map(|ns| ns.roots.iter())
            .map(move |&id| self.get(id))
    }

    /// Number of registered nodes, leaves and groups alike.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a root command by name, ignoring case.
    ///
    /// # Errors
    ///
    /// - `CommandError::UnknownCommand` if no root matches
    /// - `CommandError::AccessDenied` if the match is currently disabled
    pub fn find_root(
        &self,
        name: &str,
        auth: &dyn Authorizer,
    ) -> Result<CommandRef<'_>, CommandError> {
        let found = self
            .roots()
            .find(|root| root.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CommandError::UnknownCommand {
                name: name.to_string(),
            })?;

        if found.is_disabled(auth) {
            return Err(CommandError::AccessDenied {
                path: found.path_string(),
            });
        }
        Ok(found)
    }

    fn node(&self, id: CommandId) -> &CommandNode {
        &self.nodes[id.0]
    }
}

/// Borrowed view of one node in a [`CommandForest`].
#[derive(Clone, Copy)]
pub struct CommandRef<'f> {
    forest: &'f CommandForest,
    id: CommandId,
}

impl<'f> CommandRef<'f> {
    fn node(&self) -> &'f CommandNode {
        self.forest.node(self.id)
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn forest(&self) -> &'f CommandForest {
        self.forest
    }

    pub fn name(&self) -> &'f str {
        &self.node().name
    }

    pub fn description(&self) -> &'f str {
        &self.node().description
    }

    pub fn example(&self) -> Option<&'f str> {
        self.node().example.as_deref()
    }

    pub fn auth_required(&self) -> bool {
        self.node().auth_required
    }

    /// Check whether this node dispatches to a handler.
    pub fn is_leaf(&self) -> bool {
        matches!(self.node().body, NodeBody::Leaf { .. })
    }

    /// Declared arguments; `None` for groups.
    pub fn arguments(&self) -> Option<&'f ArgumentList> {
        match &self.node().body {
            NodeBody::Leaf { arguments, .. } => Some(arguments),
            NodeBody::Group { .. } => None,
        }
    }

    pub(crate) fn handler(&self) -> Option<&'f Handler> {
        match &self.node().body {
            NodeBody::Leaf { handler, .. } => Some(handler),
            NodeBody::Group { .. } => None,
        }
    }

    pub fn parent(&self) -> Option<CommandRef<'f>> {
        self.node().parent.map(|id| self.forest.get(id))
    }

    /// Immediate children in declaration order; empty for leaves.
    pub fn children(&self) -> impl Iterator<Item = CommandRef<'f>> + 'f {
        let forest = self.forest;
        let ids: &'f [CommandId] = match &self.node().body {
            NodeBody::Group { children } => children,
            NodeBody::Leaf { .. } => &[],
        };
        ids.iter().map(move |&id| forest.get(id))
    }

    /// Names from the root down to this node.
    pub fn full_path(&self) -> Vec<&'f str> {
        let mut path = vec![self.name()];
        let mut current = self.parent();
        while let Some(node) = current {
            path.push(node.name());
            current = node.parent();
        }
        path.reverse();
        path
    }

    /// Dotted form of [`full_path`](Self::full_path), e.g. `session.login`.
    pub fn path_string(&self) -> String {
        self.full_path().join(".")
    }

    /// True iff the node requires authorization and the session lacks it.
    pub fn is_disabled(&self, auth: &dyn Authorizer) -> bool {
        self.auth_required() && !auth.is_authorized()
    }

    /// Find an immediate child by name, ignoring case.
    ///
    /// # Errors
    ///
    /// - `CommandError::NoSubcommands` if this node is a leaf
    /// - `CommandError::SubcommandNotFound` if no child matches
    /// - `CommandError::AccessDenied` if the match is currently disabled
    pub fn child_by_name(
        &self,
        name: &str,
        auth: &dyn Authorizer,
    ) -> Result<CommandRef<'f>, CommandError> {
        if self.is_leaf() {
            return Err(CommandError::NoSubcommands {
                path: self.path_string(),
            });
        }

        let child = self
            .children()
            .find(|child| child.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| CommandError::SubcommandNotFound {
                parent: self.path_string(),
                name: name.to_string(),
            })?;

        if child.is_disabled(auth) {
            return Err(CommandError::AccessDenied {
                path: child.path_string(),
            });
        }
        Ok(child)
    }

    /// Names of the children the session may currently use.
    pub fn visible_children(&self, auth: &dyn Authorizer) -> Vec<&'f str> {
        self.children()
            .filter(|child| !child.is_disabled(auth))
            .map(|child| child.name())
            .collect()
    }

    /// One-line usage, e.g. `session.login <username> [-r|--remember]`.
    pub fn usage(&self) -> String {
        let path = self.path_string();
        match &self.node().body {
            NodeBody::Leaf { arguments, .. } if arguments.is_empty() => path,
            NodeBody::Leaf { arguments, .. } => format!("{} {}", path, arguments.usage()),
            NodeBody::Group { .. } => {
                let names: Vec<_> = self.children().map(|c| c.name()).collect();
                format!("{} <{}>", path, names.join("|"))
            }
        }
    }
}

impl fmt::Debug for CommandRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRef")
            .field("id", &self.id)
            .field("path", &self.path_string())
            .finish()
    }
}

/// What a handler receives: the resolved command and its bound arguments.
#[derive(Debug)]
pub struct Invocation<'f> {
    command: CommandRef<'f>,
    args: BoundArgs,
}

impl<'f> Invocation<'f> {
    pub fn new(command: CommandRef<'f>, args: BoundArgs) -> Self {
        Self { command, args }
    }

    pub fn command(&self) -> CommandRef<'f> {
        self.command
    }

    pub fn args(&self) -> &BoundArgs {
        &self.args
    }

    /// Shorthand for `args().get(name)`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.args.get(name)
    }

    /// Shorthand for `args().flag(name)`.
    pub fn flag(&self, name: &str) -> bool {
        self.args.flag(name)
    }
}

/// Collects command definitions and builds the forest.
#[derive(Debug, Default)]
pub struct ForestBuilder {
    namespaces: Vec<(Option<String>, Vec<CommandDef>)>,
}

impl ForestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a root command under a namespace label.
    ///
    /// Registering under an existing label appends to it.
    pub fn register(mut self, namespace: Option<&str>, def: CommandDef) -> Self {
        match self
            .namespaces
            .iter_mut()
            .find(|(label, _)| label.as_deref() == namespace)
        {
            Some((_, defs)) => defs.push(def),
            None => self
                .namespaces
                .push((namespace.map(str::to_string), vec![def])),
        }
        self
    }

    /// Register several root commands under one label.
    pub fn register_all<I>(self, namespace: Option<&str>, defs: I) -> Self
    where
        I: IntoIterator<Item = CommandDef>,
    {
        defs.into_iter()
            .fold(self, |builder, def| builder.register(namespace, def))
    }

    /// Validate every definition and move it into the arena.
    ///
    /// # Errors
    ///
    /// Returns the first `DefinitionError` found. Any error here is a
    /// programming defect; callers should abort startup.
    pub fn build(self) -> Result<CommandForest, DefinitionError> {
        let mut forest = CommandForest::default();

        let all_roots = self.namespaces.iter().flat_map(|(_, defs)| defs.iter());
        check_siblings(all_roots.map(CommandDef::name), "the top level")?;

        for (label, defs) in self.namespaces {
            let mut roots = Vec::with_capacity(defs.len());
            for def in defs {
                roots.push(attach(&mut forest.nodes, def, None)?);
            }
            forest.namespaces.push(Namespace { label, roots });
        }

        Ok(forest)
    }
}

fn check_siblings<'a>(
    names: impl Iterator<Item = &'a str>,
    scope: &str,
) -> Result<(), DefinitionError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.to_ascii_lowercase()) {
            return Err(DefinitionError::DuplicateCommand {
                name: name.to_string(),
                scope: scope.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_command_name(name: &str) -> Result<(), DefinitionError> {
    let reason = if name.is_empty() {
        Some("name cannot be empty")
    } else if name.contains('.') {
        Some("name cannot contain '.'")
    } else if name.starts_with('-') {
        Some("name cannot start with '-'")
    } else if name.chars().any(char::is_whitespace) {
        Some("name cannot contain whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DefinitionError::InvalidCommandName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Move `def` and its descendants into `nodes`, returning its id.
fn attach(
    nodes: &mut Vec<CommandNode>,
    def: CommandDef,
    parent: Option<CommandId>,
) -> Result<CommandId, DefinitionError> {
    validate_command_name(&def.name)?;

    let id = CommandId(nodes.len());
    match def.body {
        DefBody::Leaf { arguments, handler } => {
            nodes.push(CommandNode {
                name: def.name,
                description: def.description,
                example: def.example,
                auth_required: def.auth_required,
                parent,
                body: NodeBody::Leaf { arguments, handler },
            });
        }
        DefBody::Group { children } => {
            if children.is_empty() {
                return Err(DefinitionError::EmptyGroup(def.name));
            }
            check_siblings(
                children.iter().map(CommandDef::name),
                &format!("'{}'", def.name),
            )?;

            nodes.push(CommandNode {
                name: def.name,
                description: def.description,
                example: def.example,
                auth_required: def.auth_required,
                parent,
                body: NodeBody::Group {
                    children: Vec::new(),
                },
            });

            let mut child_ids = Vec::with_capacity(children.len());
            for child in children {
                child_ids.push(attach(nodes, child, Some(id))?);
            }
            nodes[id.0].body = NodeBody::Group {
                children: child_ids,
            };
        }
    }

    Ok(id)
}
