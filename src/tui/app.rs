use crate::dataset::Dataset;
use crate::filter::{Page, RowFilter, paginate};
use crate::registry::FieldRegistry;
use crate::utils::AppConfig;
use lru::LruCache;
use std::num::NonZeroUsize;
use tracing::warn;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Suggest,
    Help,
}

/// LRU cache size for suggestion lists (field, query, case)
const SUGGESTION_CACHE_SIZE: NonZeroUsize = NonZeroUsize::new(128).unwrap();

type CacheKey = (usize, String, bool);

/// Application state
pub struct App {
    dataset: Dataset,
    registry: FieldRegistry,
    /// Indexed fields, one input box each
    pub fields: Vec<String>,
    /// Text typed into each field's box
    pub inputs: Vec<String>,
    /// Field whose box has the cursor
    pub focused: usize,
    pub suggestions: Vec<String>,
    pub selected: usize,
    pub case_sensitive: bool,
    pub mode: Mode,
    pub filter: RowFilter,
    /// Rows passing `filter`
    pub visible_rows: Vec<usize>,
    pub page: usize,
    pub page_size: usize,
    pub max_suggestions: usize,
    pub suggestion_max_length: usize,
    pub status_message: String,
    suggestion_cache: LruCache<CacheKey, Vec<String>>,
}

impl App {
    pub fn new(dataset: Dataset, registry: FieldRegistry, config: &AppConfig) -> Self {
        let fields: Vec<String> = registry.fields().map(str::to_string).collect();
        let visible_rows: Vec<usize> = (0..dataset.len()).collect();
        let status_message = format!("{} rows, {} fields indexed", dataset.len(), fields.len());

        Self {
            inputs: vec![String::new(); fields.len()],
            fields,
            dataset,
            registry,
            focused: 0,
            suggestions: Vec::new(),
            selected: 0,
            case_sensitive: config.case_sensitive,
            mode: Mode::Suggest,
            filter: RowFilter::new(),
            visible_rows,
            page: 0,
            page_size: config.page_size.max(1),
            max_suggestions: config.max_suggestions,
            suggestion_max_length: config.suggestion_max_length,
            status_message,
            suggestion_cache: LruCache::new(SUGGESTION_CACHE_SIZE),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn focused_field(&self) -> Option<&str> {
        self.fields.get(self.focused).map(String::as_str)
    }

    pub fn focused_input(&self) -> &str {
        self.inputs.get(self.focused).map(String::as_str).unwrap_or("")
    }

    pub fn current_page(&self) -> Page<'_> {
        paginate(&self.visible_rows, self.page, self.page_size)
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(input) = self.inputs.get_mut(self.focused) {
            input.push(c);
            self.on_input_changed();
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(input) = self.inputs.get_mut(self.focused) {
            input.pop();
            self.on_input_changed();
        }
    }

    /// Delete the last word of the focused input (Ctrl+W)
    pub fn delete_word(&mut self) {
        if let Some(input) = self.inputs.get_mut(self.focused) {
            let trimmed = input.trim_end().len();
            input.truncate(trimmed);
            let cut = input.rfind(char::is_whitespace).map(|i| i + 1).unwrap_or(0);
            input.truncate(cut);
            self.on_input_changed();
        }
    }

    pub fn clear_input(&mut self) {
        if let Some(input) = self.inputs.get_mut(self.focused) {
            input.clear();
            self.on_input_changed();
        }
    }

    /// Re-query the focused field, or drop its filter once the box is empty
    fn on_input_changed(&mut self) {
        if self.focused_input().is_empty() {
            self.suggestions.clear();
            self.selected = 0;
            if let Some(column) = self.focused_column()
                && self.filter.selection(column).is_some()
            {
                self.filter.deselect(column);
                self.refresh_rows();
            }
            return;
        }
        self.refresh_suggestions();
    }

    pub fn refresh_suggestions(&mut self) {
        let Some(field) = self.fields.get(self.focused).cloned() else {
            return;
        };
        let query = self.focused_input().to_string();
        let key: CacheKey = (self.focused, query.clone(), self.case_sensitive);

        if let Some(cached) = self.suggestion_cache.get(&key) {
            self.suggestions = cached.clone();
        } else {
            match self
                .registry
                .suggest(&field, &query, self.case_sensitive, self.max_suggestions)
            {
                Ok(found) => {
                    self.suggestion_cache.put(key, found.clone());
                    self.suggestions = found;
                }
                Err(e) => {
                    warn!("suggest failed: {:#}", e);
                    self.status_message = format!("Error: {:#}", e);
                    self.suggestions.clear();
                }
            }
        }
        self.selected = 0;
    }

    pub fn select_next(&mut self) {
        if !self.suggestions.is_empty() {
            self.selected = (self.selected + 1) % self.suggestions.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.suggestions.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.suggestions.len() - 1);
        }
    }

    /// Put the selected suggestion in the box and filter rows by it
    pub fn accept(&mut self) {
        let Some(choice) = self.suggestions.get(self.selected).cloned() else {
            return;
        };
        let Some(column) = self.focused_column() else {
            return;
        };

        self.filter.select(column, &choice);
        if let Some(input) = self.inputs.get_mut(self.focused) {
            *input = choice;
        }
        self.suggestions.clear();
        self.selected = 0;
        self.refresh_rows();
    }

    pub fn close_suggestions(&mut self) {
        self.suggestions.clear();
        self.selected = 0;
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
            self.close_suggestions();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = self.focused.checked_sub(1).unwrap_or(self.fields.len() - 1);
            self.close_suggestions();
        }
    }

    pub fn toggle_case(&mut self) {
        self.case_sensitive = !self.case_sensitive;
        if !self.focused_input().is_empty() {
            self.refresh_suggestions();
        }
    }

    /// Forget every accepted suggestion and show the full table
    pub fn reset_filters(&mut self) {
        self.filter.clear();
        for input in &mut self.inputs {
            input.clear();
        }
        self.close_suggestions();
        self.refresh_rows();
    }

    pub fn page_down(&mut self) {
        let last = self.current_page().total_pages - 1;
        self.page = (self.page + 1).min(last);
    }

    pub fn page_up(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn show_help(&mut self) {
        self.mode = Mode::Help;
    }

    pub fn hide_help(&mut self) {
        self.mode = Mode::Suggest;
    }

    fn focused_column(&self) -> Option<usize> {
        let field = self.focused_field()?;
        self.registry.field(field).map(|f| f.column())
    }

    fn refresh_rows(&mut self) {
        self.visible_rows = self.filter.apply(&self.dataset);
        self.page = 0;
        self.status_message = format!(
            "{} of {} rows{}",
            self.visible_rows.len(),
            self.dataset.len(),
            if self.case_sensitive { " (case sensitive)" } else { "" }
        );
    }
}
