//! Undo/Redo-Manager mit linearer History aus Command-Batches.
//!
//! Die History ist eine Folge von [`CommandBatch`]es plus Cursor. Einzelne
//! Commands werden als Singleton-Batch abgelegt; `begin_batch`/`execute_batch`
//! (verschachtelbar) sammeln mehrere Commands zu einem atomaren Schritt.

use crate::command::{BoxedCommand, CommandError};
use crate::shared::HISTORY_LIMIT;
use std::collections::VecDeque;
use thiserror::Error;

/// Fehler des Undo/Redo-Managers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// `execute_batch` ohne offenes `begin_batch`
    #[error("execute_batch ohne offenen Batch")]
    NoOpenBatch,
    /// Ein Command ist bei Redo/Undo fehlgeschlagen
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Änderung der History, an Listener gemeldet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEvent {
    /// Neuer Batch an `index` abgelegt und angewendet
    Executed { index: usize },
    /// Batch an `index` rückgängig gemacht
    Undone { index: usize },
    /// Batch an `index` wiederhergestellt
    Redone { index: usize },
    /// History geleert
    Cleared,
}

/// Handle zum Abmelden eines Listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&HistoryEvent)>;

/// Geordnete Folge von Commands, die als ein Schritt gilt.
pub struct CommandBatch<D> {
    label: String,
    commands: Vec<BoxedCommand<D>>,
}

impl<D> CommandBatch<D> {
    /// Erstellt einen Batch; ohne Label wird eines aus den Commands gebildet.
    pub fn new(label: Option<String>, commands: Vec<BoxedCommand<D>>) -> Self {
        let label = label.unwrap_or_else(|| match commands.as_slice() {
            [single] => single.description(),
            many => format!("{} Änderungen", many.len()),
        });
        Self { label, commands }
    }

    /// Anzeigetext des Batches
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Anzahl Commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Gibt `true` zurück, wenn der Batch keine Commands enthält.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Beschreibungen der Commands in Ausführungsreihenfolge.
    pub fn descriptions(&self) -> impl Iterator<Item = String> + '_ {
        self.commands.iter().map(|c| c.description())
    }

    fn apply(&mut self, context: &mut D) -> Result<(), CommandError> {
        for (i, command) in self.commands.iter_mut().enumerate() {
            if let Err(e) = command.redo(context) {
                log::warn!(
                    "'{}': Redo bei Command {}/{} abgebrochen, Batch teilweise angewendet: {}",
                    self.label,
                    i + 1,
                    self.commands.len(),
                    e
                );
                return Err(e);
            }
        }
        Ok(())
    }

    // Rückwärts: spätere Commands bauen auf dem Zustand früherer auf
    fn revert(&mut self, context: &mut D) -> Result<(), CommandError> {
        let total = self.commands.len();
        for (i, command) in self.commands.iter_mut().enumerate().rev() {
            if let Err(e) = command.undo(context) {
                log::warn!(
                    "'{}': Undo bei Command {}/{} abgebrochen, Batch teilweise zurückgenommen: {}",
                    self.label,
                    i + 1,
                    total,
                    e
                );
                return Err(e);
            }
        }
        Ok(())
    }
}

impl<D> std::fmt::Debug for CommandBatch<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandBatch")
            .field("label", &self.label)
            .field("len", &self.commands.len())
            .finish()
    }
}

/// Linearer Undo/Redo-Manager über einem Kontext `D`.
///
/// Zustände: Idle (`batch_depth() == 0`) und Batching. Im Batching-Zustand
/// werden Commands nur gesammelt und erst beim Schließen des äußersten
/// Batches angewendet.
pub struct UndoRedoManager<D> {
    history: VecDeque<CommandBatch<D>>,
    /// Anzahl angewendeter Batches (= currentIndex + 1)
    applied: usize,
    limit: usize,
    pending: Vec<BoxedCommand<D>>,
    pending_label: Option<String>,
    depth: usize,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl<D> Default for UndoRedoManager<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> UndoRedoManager<D> {
    /// Manager mit Standard-Tiefe.
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    /// Manager mit maximaler Anzahl Batches (0 = unbegrenzt).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            history: VecDeque::new(),
            applied: 0,
            limit,
            pending: Vec::new(),
            pending_label: None,
            depth: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    // ── Batching ────────────────────────────────────────────────────

    /// Öffnet einen (ggf. verschachtelten) Batch.
    pub fn begin_batch(&mut self) {
        self.depth += 1;
    }

    /// Öffnet einen Batch mit Anzeigetext; das erste Label gewinnt.
    pub fn begin_batch_with_label(&mut self, label: impl Into<String>) {
        if self.pending_label.is_none() {
            self.pending_label = Some(label.into());
        }
        self.begin_batch();
    }

    /// Schließt den innersten Batch.
    ///
    /// Beim Schließen des äußersten Batches werden alle gesammelten Commands
    /// als ein Schritt angewendet und abgelegt.
    pub fn execute_batch(&mut self, context: &mut D) -> Result<(), EditError> {
        if self.depth == 0 {
            return Err(EditError::NoOpenBatch);
        }
        self.depth -= 1;
        if self.depth > 0 {
            return Ok(());
        }
        let commands = std::mem::take(&mut self.pending);
        let label = self.pending_label.take();
        self.file(CommandBatch::new(label, commands), context)
    }

    /// Gibt `true` zurück, solange ein Batch offen ist.
    pub fn is_batching(&self) -> bool {
        self.depth > 0
    }

    /// Verschachtelungstiefe offener Batches
    pub fn batch_depth(&self) -> usize {
        self.depth
    }

    // ── Ausführen ───────────────────────────────────────────────────

    /// Führt einen Command aus (oder sammelt ihn im offenen Batch).
    pub fn execute_command(
        &mut self,
        command: BoxedCommand<D>,
        context: &mut D,
    ) -> Result<(), EditError> {
        if self.is_batching() {
            self.pending.push(command);
            return Ok(());
        }
        self.file(CommandBatch::new(None, vec![command]), context)
    }

    /// Führt mehrere Commands als einen Schritt aus (oder sammelt sie).
    pub fn execute_commands(
        &mut self,
        commands: impl IntoIterator<Item = BoxedCommand<D>>,
        context: &mut D,
    ) -> Result<(), EditError> {
        if self.is_batching() {
            self.pending.extend(commands);
            return Ok(());
        }
        let commands: Vec<_> = commands.into_iter().collect();
        self.file(CommandBatch::new(None, commands), context)
    }

    /// Wendet einen Batch an und legt ihn ab.
    ///
    /// Scheitert ein Command, bleibt der Batch trotzdem (teilweise angewendet)
    /// in der History; der Fehler wird nach der Benachrichtigung zurückgegeben.
    fn file(&mut self, mut batch: CommandBatch<D>, context: &mut D) -> Result<(), EditError> {
        if batch.is_empty() {
            log::debug!("Leerer Batch wird nicht abgelegt");
            return Ok(());
        }

        self.history.truncate(self.applied);
        let result = batch.apply(context);

        self.history.push_back(batch);
        self.applied += 1;
        if self.limit > 0 {
            while self.history.len() > self.limit {
                self.history.pop_front();
                self.applied -= 1;
            }
        }

        self.notify(HistoryEvent::Executed {
            index: self.applied - 1,
        });
        result.map_err(EditError::from)
    }

    // ── Undo / Redo ─────────────────────────────────────────────────

    /// Macht den Batch am Cursor rückgängig.
    ///
    /// Gibt `Ok(false)` zurück, wenn nichts rückgängig zu machen ist. Bei einem
    /// Fehler bleibt der Cursor stehen.
    pub fn undo(&mut self, context: &mut D) -> Result<bool, EditError> {
        if self.applied == 0 {
            return Ok(false);
        }
        let index = self.applied - 1;
        self.history[index].revert(context)?;
        self.applied = index;
        self.notify(HistoryEvent::Undone { index });
        Ok(true)
    }

    /// Wendet den Batch nach dem Cursor erneut an.
    ///
    /// Gibt `Ok(false)` zurück, wenn nichts wiederherzustellen ist. Der Cursor
    /// rückt auch bei einem Fehler vor.
    pub fn redo(&mut self, context: &mut D) -> Result<bool, EditError> {
        if self.applied >= self.history.len() {
            return Ok(false);
        }
        let index = self.applied;
        self.applied += 1;
        let result = self.history[index].apply(context);
        self.notify(HistoryEvent::Redone { index });
        result?;
        Ok(true)
    }

    /// Verwirft die gesamte History; ein offener Batch bleibt bestehen.
    pub fn clear(&mut self) {
        self.history.clear();
        self.applied = 0;
        self.notify(HistoryEvent::Cleared);
    }

    // ── Abfragen ────────────────────────────────────────────────────

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        self.applied < self.history.len()
    }

    /// Index des zuletzt angewendeten Batches, `-1` vor dem ersten.
    pub fn current_index(&self) -> isize {
        self.applied as isize - 1
    }

    /// Anzahl abgelegter Batches
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Gibt `true` zurück, wenn keine Batches abgelegt sind.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Maximale Tiefe (0 = unbegrenzt)
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Setzt die maximale Tiefe; überzählige älteste Batches entfallen sofort.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        if limit == 0 {
            return;
        }
        while self.history.len() > limit {
            self.history.pop_front();
            self.applied = self.applied.saturating_sub(1);
        }
    }

    /// Anzeigetext des nächsten Undo-Schritts
    pub fn undo_description(&self) -> Option<&str> {
        self.applied
            .checked_sub(1)
            .and_then(|i| self.history.get(i))
            .map(CommandBatch::label)
    }

    /// Anzeigetext des nächsten Redo-Schritts
    pub fn redo_description(&self) -> Option<&str> {
        self.history.get(self.applied).map(CommandBatch::label)
    }

    /// Abgelegte Batches, ältester zuerst.
    pub fn batches(&self) -> impl Iterator<Item = &CommandBatch<D>> {
        self.history.iter()
    }

    // ── Benachrichtigung ────────────────────────────────────────────

    /// Registriert einen Listener für History-Änderungen.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&HistoryEvent) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Meldet einen Listener ab; `false` wenn unbekannt.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: HistoryEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}

impl<D> std::fmt::Debug for UndoRedoManager<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoRedoManager")
            .field("len", &self.history.len())
            .field("current_index", &self.current_index())
            .field("limit", &self.limit)
            .field("batch_depth", &self.depth)
            .field("pending", &self.pending.len())
            .finish()
    }
}
