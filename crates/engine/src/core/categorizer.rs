//! Partitions the escrow event history into per-viewer lifecycle buckets.
//!
//! Runs once per trigger and recomputes every bucket from the full history —
//! nothing is incremental. The pure partition step is separated from the
//! async enrichment step (status queries, name resolution) so the bucket
//! logic is testable without a chain.

use std::collections::{HashMap, HashSet};

use alloy::primitives::{Address, U256};
use tracing::{debug, warn};

use crate::chain::ChainView;
use crate::constants::ETH_LABEL;
use crate::core::classifier::{classify, classify_initiator_only};
use crate::types::{
    Classification, ClassifiedSwap, EventPosition, LifecycleEvent, RemovalCause, RemovedSwap,
    StatusDot, SwapBuckets, SwapTerms, TokenType, ViewerRole,
};

// ---------------------------------------------------------------------------
// Pure partition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TerminalKind {
    Completed,
    Removed,
}

/// Bucket membership before enrichment: terms only, no network involved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub initiated: Vec<SwapTerms>,
    pub to_accept: Vec<SwapTerms>,
    pub open: Vec<SwapTerms>,
    pub completed: Vec<SwapTerms>,
    pub removed: Vec<(SwapTerms, RemovalCause)>,
}

/// Split the event history into the five disjoint buckets for one viewer.
///
/// A swap id claimed by both a Completed and a Removed event is terminal
/// either way; the chronologically later event (block, then log index)
/// decides which bucket shows it. An un-terminal swap past its expiry is
/// reclassified as removed-by-expiry for the parties to it — the contract's
/// eligibility rules have already invalidated it even without an event.
pub fn partition(events: &[LifecycleEvent], viewer: Address, now: u64) -> Partition {
    let mut initiated_order: Vec<&SwapTerms> = Vec::new();
    let mut terms_by_id: HashMap<U256, &SwapTerms> = HashMap::new();
    let mut terminal: HashMap<U256, (TerminalKind, EventPosition)> = HashMap::new();

    for event in events {
        match event {
            LifecycleEvent::Initiated { terms, .. } => {
                initiated_order.push(terms);
                terms_by_id.entry(terms.swap_id).or_insert(terms);
            }
            LifecycleEvent::Completed { swap_id, position } => {
                upsert_terminal(&mut terminal, *swap_id, TerminalKind::Completed, *position);
            }
            LifecycleEvent::Removed { swap_id, position } => {
                upsert_terminal(&mut terminal, *swap_id, TerminalKind::Removed, *position);
            }
        }
    }

    for id in terminal.keys() {
        if !terms_by_id.contains_key(id) {
            debug!(swap_id = %id, "terminal event without a matching initiation; dropped");
        }
    }

    let mut out = Partition::default();

    // Live swaps, split by the viewer's relationship. A viewer's own open
    // swap lands in `initiated` only — never in `open`.
    for terms in &initiated_order {
        if terminal.contains_key(&terms.swap_id) || terms.is_expired(now) {
            continue;
        }
        match terms.role_of(viewer) {
            ViewerRole::Initiator => out.initiated.push((*terms).clone()),
            ViewerRole::Acceptor => out.to_accept.push((*terms).clone()),
            ViewerRole::Observer if terms.is_open() => out.open.push((*terms).clone()),
            ViewerRole::Observer => {}
        }
    }

    // Completed swaps the viewer was party to, in completion-event order.
    let mut emitted: HashSet<U256> = HashSet::new();
    for event in events {
        let LifecycleEvent::Completed { swap_id, .. } = event else {
            continue;
        };
        if !matches!(terminal.get(swap_id), Some((TerminalKind::Completed, _))) {
            continue;
        }
        if !emitted.insert(*swap_id) {
            continue;
        }
        if let Some(terms) = terms_by_id.get(swap_id) {
            if terms.is_party(viewer) {
                out.completed.push((*terms).clone());
            }
        }
    }

    // Explicit removals first, then expiries, both in initiation order and
    // both restricted to swaps the viewer is a party to.
    for terms in &initiated_order {
        if matches!(
            terminal.get(&terms.swap_id),
            Some((TerminalKind::Removed, _))
        ) && terms.is_party(viewer)
        {
            out.removed.push(((*terms).clone(), RemovalCause::Removed));
        }
    }
    for terms in &initiated_order {
        if !terminal.contains_key(&terms.swap_id)
            && terms.is_expired(now)
            && terms.is_party(viewer)
        {
            out.removed.push(((*terms).clone(), RemovalCause::Expired));
        }
    }

    out
}

fn upsert_terminal(
    terminal: &mut HashMap<U256, (TerminalKind, EventPosition)>,
    swap_id: U256,
    kind: TerminalKind,
    position: EventPosition,
) {
    match terminal.get(&swap_id).copied() {
        Some((existing_kind, existing_pos)) => {
            if existing_kind != kind {
                // The contract's own invariant says this cannot happen; keep
                // the later event rather than trusting it.
                warn!(
                    swap_id = %swap_id,
                    "swap id claimed by both Completed and Removed events"
                );
            }
            if position > existing_pos {
                terminal.insert(swap_id, (kind, position));
            }
        }
        None => {
            terminal.insert(swap_id, (kind, position));
        }
    }
}

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

/// Full categorization: partition, then attach classification and display
/// names to every surfaced swap. Each swap's queries are independent — one
/// failure degrades that swap alone, never the batch.
pub async fn categorize<V: ChainView>(
    view: &V,
    events: &[LifecycleEvent],
    viewer: Address,
    now: u64,
) -> SwapBuckets {
    let split = partition(events, viewer, now);
    let mut buckets = SwapBuckets::default();

    for terms in split.initiated {
        buckets.initiated.push(enrich_live(view, terms, false).await);
    }
    for terms in split.to_accept {
        buckets.to_accept.push(enrich_live(view, terms, false).await);
    }
    for terms in split.open {
        // Open-bucket browsing only ever shows the initiator-side view.
        buckets.open.push(enrich_live(view, terms, true).await);
    }
    for terms in split.completed {
        buckets
            .completed
            .push(enrich_terminal(view, terms, StatusDot::Complete).await);
    }
    for (terms, cause) in split.removed {
        let swap = enrich_terminal(view, terms, StatusDot::Removed).await;
        buckets.removed.push(RemovedSwap { swap, cause });
    }

    buckets
}

async fn enrich_live<V: ChainView>(
    view: &V,
    terms: SwapTerms,
    initiator_only: bool,
) -> ClassifiedSwap {
    let classification = match view.swap_status(&terms).await {
        Ok(flags) => {
            if initiator_only {
                classify_initiator_only(&flags)
            } else {
                classify(&terms, &flags)
            }
        }
        Err(e) => {
            warn!(
                swap_id = %terms.swap_id,
                error = %e,
                "status query failed; degrading swap to unknown"
            );
            Classification::unknown()
        }
    };
    let (initiator_token_name, acceptor_token_name) = leg_names(view, &terms).await;
    ClassifiedSwap {
        terms,
        classification,
        initiator_token_name,
        acceptor_token_name,
    }
}

async fn enrich_terminal<V: ChainView>(view: &V, terms: SwapTerms, dot: StatusDot) -> ClassifiedSwap {
    let (initiator_token_name, acceptor_token_name) = leg_names(view, &terms).await;
    ClassifiedSwap {
        terms,
        classification: Classification::terminal(dot),
        initiator_token_name,
        acceptor_token_name,
    }
}

async fn leg_names<V: ChainView>(view: &V, terms: &SwapTerms) -> (String, String) {
    let initiator = leg_name(view, terms.initiator_token_type, terms.initiator_erc_contract).await;
    let acceptor = leg_name(view, terms.acceptor_token_type, terms.acceptor_erc_contract).await;
    (initiator, acceptor)
}

async fn leg_name<V: ChainView>(view: &V, token_type: TokenType, contract: Address) -> String {
    if token_type.has_contract() {
        view.token_name(contract).await
    } else {
        ETH_LABEL.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
