//! # Analysis Session
//!
//! One [`AnalysisRun`] is one detection pass over one parsed source.
//! The run owns every detection it emitted together with the token
//! index; nothing outlives it and nothing is shared across runs, so
//! concurrent analyses of different sources cannot see each other's
//! candidates. Correlation tokens are derived from the source digest and
//! the candidate's spans: the same source re-derives the same tokens,
//! while a token minted against different text never resolves.

use std::collections::HashMap;

use ast_grep_language::SupportLang as Language;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::curry::{CurryGroup, apply_curry_fix, find_curry_groups};
use crate::errors::{ServiceError, SkipReason};
use crate::pipe::{PipeCandidate, apply_pipe_fix, build_pipe_candidate};
use crate::tree::{Node, NodeKind, Span, parse_source, walk};

/// The two refactorings this crate detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleId {
    Pipe,
    Curry,
}

impl RuleId {
    pub const ALL: [RuleId; 2] = [RuleId::Pipe, RuleId::Curry];

    pub fn id(&self) -> &'static str {
        match self {
            RuleId::Pipe => "pipe",
            RuleId::Curry => "curry",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RuleId::Pipe => "Compose sequential calls into a pipe",
            RuleId::Curry => "Curry shared arguments",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RuleId::Pipe => {
                "Collapses a run of single-argument calls threaded through \
                 intermediate variables into one composed pipe expression"
            }
            RuleId::Curry => {
                "Rewrites a function whose call sites pin the same leading \
                 arguments into a chain of single-parameter functions with \
                 two-stage call sites"
            }
        }
    }
}

/// Full structured payload of a detection, embedded in the detection
/// itself rather than held in any shared lookup table.
#[derive(Debug, Clone)]
pub enum Candidate {
    Pipe(PipeCandidate),
    Curry(CurryGroup),
}

/// One reported opportunity. Over the wire only `message`, `span` and
/// `token` travel; the candidate stays with the run.
#[derive(Debug, Clone)]
pub struct Detection {
    pub rule: RuleId,
    pub message: String,
    pub span: Span,
    pub token: String,
    pub candidate: Candidate,
}

/// Sink the registered callbacks report into.
pub struct Emitter<'a> {
    source_digest: &'a str,
    detections: &'a mut Vec<Detection>,
}

impl Emitter<'_> {
    pub fn report(&mut self, rule: RuleId, message: String, span: Span, candidate: Candidate) {
        let token = derive_token(
            self.source_digest,
            rule,
            span,
            self.detections.len(),
            &candidate,
        );
        self.detections.push(Detection {
            rule,
            message,
            span,
            token,
            candidate,
        });
    }
}

pub type NodeCallback = fn(&mut Emitter, &Node);
pub type TreeCallback = fn(&mut Emitter, &Node);

/// How a rule hooks into the session's traversal: once per node of a
/// kind, or once per tree.
pub enum Registration {
    ForNodeKind(NodeKind, NodeCallback),
    ForTree(TreeCallback),
}

/// The callbacks a run dispatches to, one entry per rule.
pub fn registrations() -> Vec<Registration> {
    vec![
        Registration::ForNodeKind(NodeKind::FunctionDeclaration, check_pipe_function),
        Registration::ForTree(check_curry_tree),
    ]
}

fn check_pipe_function(emitter: &mut Emitter, function: &Node) {
    let Some(candidate) = build_pipe_candidate(function) else {
        return;
    };
    let mut message = format!(
        "Function '{}' can compose {} into a pipe",
        candidate.function_name,
        candidate.call_names().join(" -> "),
    );
    if !candidate.can_rewrite {
        message.push_str(" (intermediate results are still referenced elsewhere)");
    }
    let span = candidate.replacement_span;
    emitter.report(RuleId::Pipe, message, span, Candidate::Pipe(candidate));
}

fn check_curry_tree(emitter: &mut Emitter, root: &Node) {
    for group in find_curry_groups(root) {
        let message = format!(
            "Arguments ({}) in '{}' can be curried",
            group.shared_args.join(", "),
            group.anchor().text,
        );
        let span = group.anchor().span;
        emitter.report(RuleId::Curry, message, span, Candidate::Curry(group));
    }
}

/// Result of a fix request: a fully rewritten source and its re-parsed
/// tree, or no change at all.
#[derive(Debug)]
pub enum FixOutcome {
    Applied { new_source: String, new_root: Node },
    NoChange { reason: SkipReason },
}

/// One completed detection pass over one source.
pub struct AnalysisRun {
    language: Language,
    source_digest: String,
    detections: Vec<Detection>,
    token_index: HashMap<String, usize>,
}

impl AnalysisRun {
    /// Run every registered rule over the tree.
    pub fn analyze(source: &str, root: &Node, language: Language) -> Self {
        let digest = source_digest(source);
        let mut detections = Vec::new();
        let mut emitter = Emitter {
            source_digest: &digest,
            detections: &mut detections,
        };

        for registration in registrations() {
            match registration {
                Registration::ForTree(callback) => callback(&mut emitter, root),
                Registration::ForNodeKind(kind, callback) => {
                    walk(root, |node| {
                        if node.kind == kind {
                            callback(&mut emitter, node);
                        }
                        true
                    });
                }
            }
        }

        debug!(
            detections = detections.len(),
            "analysis run completed"
        );

        let token_index = detections
            .iter()
            .enumerate()
            .map(|(index, detection)| (detection.token.clone(), index))
            .collect();
        Self {
            language,
            source_digest: digest,
            detections,
            token_index,
        }
    }

    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    pub fn detection(&self, token: &str) -> Option<&Detection> {
        self.token_index
            .get(token)
            .map(|&index| &self.detections[index])
    }

    /// Apply the candidate behind `token` to `source`/`root`. A token
    /// this run did not mint — including any token minted against other
    /// source text — is stale and yields no change.
    pub fn apply_fix(
        &self,
        source: &str,
        root: &Node,
        token: &str,
    ) -> Result<FixOutcome, ServiceError> {
        if source_digest(source) != self.source_digest {
            return Ok(FixOutcome::NoChange {
                reason: SkipReason::StaleToken,
            });
        }
        let Some(detection) = self.detection(token) else {
            return Ok(FixOutcome::NoChange {
                reason: SkipReason::StaleToken,
            });
        };

        let attempt = match &detection.candidate {
            Candidate::Pipe(candidate) => apply_pipe_fix(source, root, candidate)?,
            Candidate::Curry(group) => apply_curry_fix(source, root, group)?,
        };
        Ok(match attempt {
            Ok(new_source) => {
                let new_root = parse_source(&new_source, self.language);
                FixOutcome::Applied {
                    new_source,
                    new_root,
                }
            }
            Err(reason) => FixOutcome::NoChange { reason },
        })
    }
}

/// Hex SHA-256 of the source text; also the analysis cache key.
pub fn source_digest(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hex::encode(hasher.finalize())
}

fn derive_token(
    source_digest: &str,
    rule: RuleId,
    span: Span,
    ordinal: usize,
    candidate: &Candidate,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source_digest.as_bytes());
    hasher.update(rule.id().as_bytes());
    hasher.update(span.start.to_le_bytes());
    hasher.update(span.end.to_le_bytes());
    hasher.update(ordinal.to_le_bytes());
    match candidate {
        Candidate::Pipe(pipe) => {
            for part in &pipe.parts {
                hasher.update(part.node_to_remove.start.to_le_bytes());
                hasher.update(part.node_to_remove.end.to_le_bytes());
            }
        }
        Candidate::Curry(group) => {
            for member in &group.members {
                hasher.update(member.span.start.to_le_bytes());
                hasher.update(member.span.end.to_le_bytes());
            }
        }
    }
    hex::encode(hasher.finalize())[..16].to_string()
}
