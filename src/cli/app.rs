//! CLI module for the brutal notes application
//!
//! This module handles the command-line interface for interacting with the
//! document repository. It plays the part of the editing surface: it shows
//! resolved content, collects new content, and turns every outcome into a
//! notification line.
use std::{
    fs::{self, read_to_string},
    io::{stdin, stdout, BufRead, Write},
    path::{Path, PathBuf},
    process::Command,
};

use console::style;
use log::{debug, info};
use shell_words::split;
use tempfile::Builder;

use crate::{
    confirm, export_file_name, preview, read_content_file, render_export, BuiltIn, Commands,
    Config, ContentResolver, DocumentKind, DocumentRecord, DocumentRepository, ExportFormat,
    NotesError, Operation, Result, SearchIndex, TemplateCatalog,
};

/// CLI Application handler - processes CLI commands against the repository
pub struct App {
    /// The document repository, owned for the whole session
    repository: DocumentRepository,

    /// Application configuration
    config: Config,

    /// Whether to display verbose output
    verbose: bool,
}

impl App {
    /// Create a new CLI application with the given repository and config
    pub fn new(repository: DocumentRepository, config: Config, verbose: bool) -> Self {
        Self {
            repository,
            config,
            verbose,
        }
    }

    pub fn repository(&self) -> &DocumentRepository {
        &self.repository
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::New { note } => self.handle_new(note),
            Commands::Show { id } => self.handle_show(&id),
            Commands::List {
                archived,
                favorites,
            } => self.handle_list(archived, favorites),
            Commands::Search { query } => self.handle_search(&query),
            Commands::Save {
                id,
                title,
                content,
                file,
                edit,
            } => self.handle_save(&id, title, content, file, edit),
            Commands::Rename { id, title } => self.handle_rename(&id, &title),
            Commands::Archive { id } => self.handle_archive(&id),
            Commands::Delete { id, force } => {
                self.handle_delete(&id, force, &mut stdin().lock(), &mut stdout())
            }
            Commands::Export { id, format, output } => self.handle_export(&id, format, output),
            Commands::Dashboard => self.handle_dashboard(),
        }
    }

    fn handle_new(&mut self, note: bool) -> Result<()> {
        let kind = if note {
            DocumentKind::Note
        } else {
            DocumentKind::Document
        };

        let record = self.repository.create(kind)?;
        println!("{}", style(format!("{} CREATED", kind.default_title())).bold());
        println!("ID: {}", record.id);
        Ok(())
    }

    fn handle_show(&self, id: &str) -> Result<()> {
        let resolved = ContentResolver::new(&self.repository).resolve(id);
        println!("{}", style(&resolved.title).bold());
        println!("{}", separator());
        println!("{}", resolved.content.trim_end());
        Ok(())
    }

    fn handle_list(&self, archived: bool, favorites: bool) -> Result<()> {
        if archived || favorites {
            let records: Vec<&DocumentRecord> = if archived {
                self.repository.archived().collect()
            } else {
                self.repository.favorites()
            };

            if records.is_empty() {
                println!(
                    "{}",
                    if archived {
                        "No archived documents"
                    } else {
                        "No favorite notes"
                    }
                );
                return Ok(());
            }
            for record in records {
                self.print_record(record);
            }
            return Ok(());
        }

        for entry in self.repository.sidebar_entries() {
            println!("{:<28} {}", entry.id, entry.name.to_uppercase());
        }
        Ok(())
    }

    fn handle_search(&self, query: &str) -> Result<()> {
        let entries = self.repository.sidebar_entries();
        let visible = SearchIndex::filter(query, &entries);

        if visible.is_empty() {
            println!("No documents found matching query: \"{}\"", query);
            return Ok(());
        }

        for entry in entries.iter().filter(|e| visible.contains(&e.id.as_str())) {
            println!("{:<28} {}", entry.id, entry.name.to_uppercase());
        }
        if self.verbose {
            println!("\nFound {} matching documents.", visible.len());
        }
        Ok(())
    }

    fn handle_save(
        &mut self,
        id: &str,
        title: Option<String>,
        content: Option<String>,
        file: Option<PathBuf>,
        edit: bool,
    ) -> Result<()> {
        let current = ContentResolver::new(&self.repository).resolve(id);
        let title = title.unwrap_or_else(|| current.title.clone());

        let content = match (content, file) {
            (Some(content), _) => content,
            (None, Some(path)) => read_content_file(&path)?,
            (None, None) if edit => self.open_editor_with_content(&current.content)?,
            (None, None) => current.content,
        };

        self.repository.save(id, &content, &title)?;
        println!("{}", TemplateCatalog::save_message(BuiltIn::from_id(id)));
        Ok(())
    }

    fn handle_rename(&mut self, id: &str, title: &str) -> Result<()> {
        if self.repository.rename(id, title)? {
            println!("DOCUMENT RENAMED");
        } else {
            println!("Nothing to rename: {} has not been saved yet", id);
        }
        Ok(())
    }

    fn handle_archive(&mut self, id: &str) -> Result<()> {
        self.repository.archive(id)?;
        println!("DOCUMENT ARCHIVED");
        Ok(())
    }

    /// Deletes after asking on `output` and reading the answer from `input`.
    fn handle_delete(
        &mut self,
        id: &str,
        force: bool,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> Result<()> {
        // Rejections come before the prompt
        let record = self.repository.check_removable(id, Operation::Delete)?;

        if !force {
            writeln!(output, "You are about to delete the following document:")?;
            writeln!(output, "ID:    {}", record.id)?;
            writeln!(output, "Title: {}", record.title)?;
            writeln!(
                output,
                "\nThis document will be permanently deleted. This action cannot be undone."
            )?;

            if !confirm("DELETE DOCUMENT?", input, output)? {
                writeln!(output, "Deletion cancelled.")?;
                return Ok(());
            }
        }

        self.repository.delete(id)?;
        println!("DOCUMENT DELETED BRUTALLY");
        Ok(())
    }

    fn handle_export(
        &self,
        id: &str,
        format: ExportFormat,
        output: Option<PathBuf>,
    ) -> Result<()> {
        let resolved = ContentResolver::new(&self.repository).resolve(id);
        let rendered = render_export(&resolved, format);

        let dir = output.unwrap_or_else(|| self.config.export_dir());
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|_| NotesError::DirectoryError { path: dir.clone() })?;
        }

        let path = export_file_name(&dir, &resolved.title, format);
        fs::write(&path, rendered)?;
        info!("Exported {} to {}", id, path.display());

        println!("EXPORTED AS {}", format.label());
        println!("{}", path.display());
        Ok(())
    }

    fn handle_dashboard(&self) -> Result<()> {
        let stats = self.repository.stats();
        println!("{}", style("QUICK STATS").bold());
        println!("TOTAL DOCUMENTS  {}", stats.total_documents);
        println!("ARCHIVED         {}", stats.archived);
        println!("FAVORITE PAGES   {}", stats.favorites);

        println!("\n{}", style("RECENT DOCUMENTS").bold());
        let recent = self.repository.recent(self.config.recent_limit);
        if recent.is_empty() {
            println!("No recent documents");
        }
        for record in recent {
            let updated = record
                .updated_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "Recently".to_string());
            println!("{:<28} {}", record.name.to_uppercase(), style(updated).cyan());
        }
        Ok(())
    }

    fn print_record(&self, record: &DocumentRecord) {
        println!("{}", separator());
        println!("ID:    {}", record.id);
        println!("Title: {}", style(&record.title).bold());
        if let Some(updated) = record.updated_at {
            println!("Updated: {}", updated.format("%Y-%m-%d %H:%M:%S"));
        }
        if self.verbose {
            println!("{}", preview(&record.content, 100));
        }
    }

    fn open_editor_with_content(&self, existing_content: &str) -> Result<String> {
        let temp_file = Builder::new().suffix(".html").tempfile()?;
        let temp_path = temp_file.path().to_path_buf();
        fs::write(&temp_path, existing_content)?;

        let editor_cmd = self.config.get_editor_command();
        info!("Opening editor to edit document content. Save and exit when done...");
        self.launch_editor(&editor_cmd, &temp_path)?;

        let content = read_to_string(&temp_path)?;
        debug!("Editor returned {} bytes", content.len());
        Ok(content)
    }

    fn launch_editor(&self, editor_cmd: &str, file_path: &Path) -> Result<()> {
        let args = split(editor_cmd).map_err(|e| NotesError::EditorError {
            message: format!("Failed to parse editor command: {}", e),
        })?;

        let Some((program, rest)) = args.split_first() else {
            return Err(NotesError::EditorError {
                message: "Empty editor command".to_string(),
            });
        };

        let status = Command::new(program).args(rest).arg(file_path).status()?;

        if !status.success() {
            return Err(NotesError::EditorError {
                message: "Editor exited with non-zero status".to_string(),
            });
        }

        Ok(())
    }
}

fn separator() -> String {
    let width = terminal_size::terminal_size()
        .map(|(terminal_size::Width(w), _)| w as usize)
        .unwrap_or(50);
    "-".repeat(width.min(50))
}
