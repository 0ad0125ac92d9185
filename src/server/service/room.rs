//! Room and entry business logic.
//!
//! Enforces the room invariants on top of the repositories: room names are unique per guild,
//! entry names are unique per room, only guild admins create or delete rooms and only guild
//! members add entries. Uniqueness is checked up front for a readable error and again by the
//! database indexes, which close the race between check and insert.

use std::{
    collections::{HashMap, HashSet},
    io::{Cursor, Write},
};

use futures_util::future::join_all;
use sea_orm::DatabaseConnection;
use zip::{result::ZipError, write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::server::{
    data::{entry::EntryRepository, room::RoomRepository},
    error::AppError,
    model::{
        entry::{CreateEntryParam, Entry},
        room::{CreateRoomParam, Dashboard, EntryView, Room, RoomView},
    },
    service::{
        access::RoomAccess,
        discord::{DiscordService, GuildInfo},
    },
    storage::UploadStore,
};

/// An uploaded file handed to `add_entry`.
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A file ready to be sent to the client as an attachment.
pub struct FileDownload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct RoomService<'a> {
    db: &'a DatabaseConnection,
    discord: &'a DiscordService,
    uploads: &'a UploadStore,
}

impl<'a> RoomService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        discord: &'a DiscordService,
        uploads: &'a UploadStore,
    ) -> Self {
        Self {
            db,
            discord,
            uploads,
        }
    }

    fn access(&self) -> RoomAccess<'a> {
        RoomAccess::new(self.discord)
    }

    /// Creates a room in `guild_id` on behalf of a guild admin.
    ///
    /// # Returns
    /// - `Ok(Room)` - The created room
    /// - `Err(AppError::Forbidden)` - User is not an admin of the guild
    /// - `Err(AppError::BadRequest)` - Name is blank
    /// - `Err(AppError::Conflict)` - Guild already has a room with that name
    pub async fn create_room(
        &self,
        guild_id: u64,
        name: &str,
        user_id: u64,
    ) -> Result<Room, AppError> {
        self.access().require_create_room(user_id, guild_id).await?;

        let name = require_name(name, "Room name cannot be empty")?;

        let room_repo = RoomRepository::new(self.db);
        if room_repo
            .find_by_guild_and_name(guild_id, &name)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "A room with this name already exists in this guild".to_string(),
            ));
        }

        let room = room_repo.create(CreateRoomParam { guild_id, name }).await?;

        tracing::info!(
            "User {} created room {} ({}) in guild {}",
            user_id,
            room.id,
            room.name,
            guild_id
        );

        Ok(room)
    }

    /// Adds an entry with an uploaded YAML file to a room.
    ///
    /// The file is stored only after every check passed and is removed again when the entry
    /// cannot be saved.
    ///
    /// # Returns
    /// - `Ok(Entry)` - The created entry
    /// - `Err(AppError::NotFound)` - Room does not exist
    /// - `Err(AppError::Forbidden)` - User is not a member of the room's guild
    /// - `Err(AppError::BadRequest)` - Blank name, wrong file type or empty file
    /// - `Err(AppError::Conflict)` - Room already has an entry with that name
    pub async fn add_entry(
        &self,
        room_id: i32,
        user_id: u64,
        entry_name: &str,
        file: UploadedFile,
    ) -> Result<Entry, AppError> {
        let room = self.require_room(room_id).await?;

        self.access().require_join_room(user_id, &room).await?;

        let name = require_name(entry_name, "Entry name cannot be empty")?;
        UploadStore::validate(&file.filename, &file.bytes)?;

        let entry_repo = EntryRepository::new(self.db);
        if entry_repo
            .find_by_room_and_name(room.id, &name)
            .await?
            .is_some()
        {
            return Err(duplicate_entry());
        }

        let key = self.uploads.save(&file.filename, file.bytes).await?;

        let result = entry_repo
            .create(CreateEntryParam {
                room_id: room.id,
                user_id,
                name,
                yaml_file_path: key.clone(),
            })
            .await;

        match result {
            Ok(entry) => {
                tracing::info!(
                    "User {} added entry {} ({}) to room {}",
                    user_id,
                    entry.id,
                    entry.name,
                    room.id
                );
                Ok(entry)
            }
            Err(e) => {
                self.remove_file(&key).await;
                Err(e)
            }
        }
    }

    /// Renames an entry on behalf of its owner.
    ///
    /// # Returns
    /// - `Ok(Entry)` - The renamed entry
    /// - `Err(AppError::NotFound)` - Entry does not exist in the room
    /// - `Err(AppError::Forbidden)` - User does not own the entry
    /// - `Err(AppError::BadRequest)` - New name is blank
    /// - `Err(AppError::Conflict)` - Another entry of the room already has the name
    pub async fn rename_entry(
        &self,
        room_id: i32,
        entry_id: i32,
        user_id: u64,
        new_name: &str,
    ) -> Result<Entry, AppError> {
        let entry = self.require_entry_in_room(room_id, entry_id).await?;

        if entry.user_id != user_id {
            return Err(AppError::Forbidden("Cannot rename another user's entry".to_string()));
        }

        let new_name = require_name(new_name, "Entry name cannot be empty")?;

        if new_name == entry.name {
            return Ok(entry);
        }

        let entry_repo = EntryRepository::new(self.db);
        if entry_repo
            .find_by_room_and_name(room_id, &new_name)
            .await?
            .is_some()
        {
            return Err(duplicate_entry());
        }

        let renamed = entry_repo
            .rename(entry.id, new_name)
            .await?
            .ok_or_else(entry_not_found)?;

        tracing::info!(
            "User {} renamed entry {} from {} to {}",
            user_id,
            entry.id,
            entry.name,
            renamed.name
        );

        Ok(renamed)
    }

    /// Deletes an entry and its file on behalf of the owner or a guild admin.
    ///
    /// # Returns
    /// - `Ok(())` - Entry deleted
    /// - `Err(AppError::NotFound)` - Room or entry does not exist, or entry is in another room
    /// - `Err(AppError::Forbidden)` - User neither owns the entry nor administers the guild
    pub async fn delete_entry(
        &self,
        room_id: i32,
        entry_id: i32,
        user_id: u64,
    ) -> Result<(), AppError> {
        let room = self.require_room(room_id).await?;
        let entry = self.require_entry_in_room(room.id, entry_id).await?;

        let is_admin = entry.user_id != user_id
            && self.discord.is_admin_of_guild(user_id, room.guild_id).await;

        self.access().require_mutate_entry(user_id, &entry, is_admin)?;

        EntryRepository::new(self.db).delete(entry.id).await?;
        self.remove_file(&entry.yaml_file_path).await;

        tracing::info!(
            "User {} deleted entry {} from room {}",
            user_id,
            entry.id,
            room.id
        );

        Ok(())
    }

    /// Deletes a room, its entries and their files on behalf of a guild admin.
    ///
    /// # Returns
    /// - `Ok(())` - Room deleted
    /// - `Err(AppError::NotFound)` - Room does not exist
    /// - `Err(AppError::Forbidden)` - User is not an admin of the room's guild
    pub async fn delete_room(&self, room_id: i32, user_id: u64) -> Result<(), AppError> {
        let room = self.require_room(room_id).await?;

        self.access().require_delete_room(user_id, &room).await?;

        let entries = RoomRepository::new(self.db)
            .delete_with_entries(room.id)
            .await?
            .ok_or_else(room_not_found)?;

        for entry in &entries {
            self.remove_file(&entry.yaml_file_path).await;
        }

        tracing::info!(
            "User {} deleted room {} with {} entries",
            user_id,
            room.id,
            entries.len()
        );

        Ok(())
    }

    /// Builds the room page for a member or admin of the room's guild.
    ///
    /// # Returns
    /// - `Ok(RoomView)` - Room, entries with owners and the user's standing in the room
    /// - `Err(AppError::NotFound)` - Room does not exist
    /// - `Err(AppError::Forbidden)` - User is neither member nor admin of the guild
    pub async fn get_room_view(&self, room_id: i32, user_id: u64) -> Result<RoomView, AppError> {
        let room = self.require_room(room_id).await?;
        let is_admin = self.require_view_access(&room, user_id).await?;

        let entries = EntryRepository::new(self.db).get_by_room(room.id).await?;

        let owner_ids: HashSet<u64> = entries.iter().map(|entry| entry.user_id).collect();
        let owners: HashMap<u64, _> = join_all(
            owner_ids
                .into_iter()
                .map(|owner_id| self.discord.get_user_info(owner_id)),
        )
        .await
        .into_iter()
        .map(|info| (info.id, info))
        .collect();

        let is_member = entries.iter().any(|entry| entry.user_id == user_id);
        let guild = self.discord.get_guild_info(room.guild_id).await;

        let entries = entries
            .into_iter()
            .filter_map(|entry| {
                let owner = owners.get(&entry.user_id)?.clone();
                Some(EntryView {
                    is_owner: entry.user_id == user_id,
                    owner,
                    entry,
                })
            })
            .collect();

        Ok(RoomView {
            room,
            guild,
            entries,
            is_admin,
            is_member,
        })
    }

    /// Loads the YAML file of an entry for a member or admin of the room's guild.
    ///
    /// # Returns
    /// - `Ok(FileDownload)` - File named `<entry name>.yaml`
    /// - `Err(AppError::NotFound)` - Room, entry or stored file does not exist
    /// - `Err(AppError::Forbidden)` - User is neither member nor admin of the guild
    pub async fn download_entry(
        &self,
        room_id: i32,
        entry_id: i32,
        user_id: u64,
    ) -> Result<FileDownload, AppError> {
        let room = self.require_room(room_id).await?;
        self.require_view_access(&room, user_id).await?;

        let entry = self.require_entry_in_room(room.id, entry_id).await?;

        let Some(bytes) = self.uploads.get(&entry.yaml_file_path).await? else {
            tracing::warn!(
                "File {} of entry {} is missing from storage",
                entry.yaml_file_path,
                entry.id
            );
            return Err(AppError::NotFound("File not found".to_string()));
        };

        Ok(FileDownload {
            filename: format!("{}.yaml", entry.name),
            bytes,
        })
    }

    /// Bundles the YAML files of every entry of a room into `<room name>_yamls.zip`.
    ///
    /// Entries whose file is missing from storage are left out of the archive.
    ///
    /// # Returns
    /// - `Ok(FileDownload)` - The zip archive
    /// - `Err(AppError::NotFound)` - Room does not exist
    /// - `Err(AppError::Forbidden)` - User is neither member nor admin of the guild
    /// - `Err(AppError::InternalError)` - The archive could not be written
    pub async fn download_all(
        &self,
        room_id: i32,
        user_id: u64,
    ) -> Result<FileDownload, AppError> {
        let room = self.require_room(room_id).await?;
        self.require_view_access(&room, user_id).await?;

        let entries = EntryRepository::new(self.db).get_by_room(room.id).await?;

        let mut files = Vec::with_capacity(entries.len());
        let mut used_names = HashSet::new();
        for entry in entries {
            let Some(bytes) = self.uploads.get(&entry.yaml_file_path).await? else {
                tracing::warn!(
                    "Leaving entry {} out of the archive of room {}, its file is missing",
                    entry.id,
                    room.id
                );
                continue;
            };

            let base = archive_name(&entry.name);
            let mut name = format!("{}.yaml", base);
            if !used_names.insert(name.clone()) {
                name = format!("{}_{}.yaml", base, entry.id);
                used_names.insert(name.clone());
            }

            files.push((name, bytes));
        }

        let bytes = build_zip(files).map_err(|e| {
            AppError::InternalError(format!("Failed to build archive of room {}: {}", room.id, e))
        })?;

        Ok(FileDownload {
            filename: format!("{}_yamls.zip", room.name),
            bytes,
        })
    }

    /// Rooms in which the user owns at least one entry, each listed once.
    pub async fn get_rooms_for_user(&self, user_id: u64) -> Result<Vec<Room>, AppError> {
        let room_ids = EntryRepository::new(self.db)
            .get_room_ids_for_user(user_id)
            .await?;

        RoomRepository::new(self.db).get_by_ids(&room_ids).await
    }

    pub async fn get_admin_guilds(&self, user_id: u64) -> Vec<GuildInfo> {
        self.discord.get_admin_guilds_for_user(user_id).await
    }

    /// Rooms of the user's guilds in which the user has no entry yet.
    ///
    /// Guilds the provider fails to answer for are already left out of the guild listing.
    pub async fn list_joinable_rooms(&self, user_id: u64) -> Result<Vec<Room>, AppError> {
        let guilds = self.discord.get_guilds_for_user(user_id).await;

        let joined: HashSet<i32> = EntryRepository::new(self.db)
            .get_room_ids_for_user(user_id)
            .await?
            .into_iter()
            .collect();

        let room_repo = RoomRepository::new(self.db);
        let mut joinable = Vec::new();

        for guild in guilds {
            let rooms = room_repo.get_by_guild(guild.id).await?;
            joinable.extend(rooms.into_iter().filter(|room| !joined.contains(&room.id)));
        }

        Ok(joinable)
    }

    /// Computes the three dashboard listings concurrently.
    pub async fn dashboard(&self, user_id: u64) -> Result<Dashboard, AppError> {
        let (user_rooms, admin_guilds, joinable_rooms) = tokio::try_join!(
            self.get_rooms_for_user(user_id),
            async { Ok::<_, AppError>(self.get_admin_guilds(user_id).await) },
            self.list_joinable_rooms(user_id),
        )?;

        Ok(Dashboard {
            user_rooms,
            admin_guilds,
            joinable_rooms,
        })
    }

    async fn require_room(&self, room_id: i32) -> Result<Room, AppError> {
        RoomRepository::new(self.db)
            .find_by_id(room_id)
            .await?
            .ok_or_else(room_not_found)
    }

    async fn require_entry_in_room(&self, room_id: i32, entry_id: i32) -> Result<Entry, AppError> {
        match EntryRepository::new(self.db).find_by_id(entry_id).await? {
            Some(entry) if entry.room_id == room_id => Ok(entry),
            _ => Err(entry_not_found()),
        }
    }

    /// Requires guild membership or admin permission and returns whether the user is admin.
    async fn require_view_access(&self, room: &Room, user_id: u64) -> Result<bool, AppError> {
        let (is_member, is_admin) = tokio::join!(
            self.discord.is_member_of_guild(user_id, room.guild_id),
            self.discord.is_admin_of_guild(user_id, room.guild_id),
        );

        if !is_member && !is_admin {
            return Err(AppError::Forbidden("Access denied to room".to_string()));
        }

        Ok(is_admin)
    }

    async fn remove_file(&self, key: &str) {
        if let Err(e) = self.uploads.delete(key).await {
            tracing::warn!("Failed to delete uploaded file {}: {}", key, e);
        }
    }
}

fn require_name(name: &str, message: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest(message.to_string()));
    }

    Ok(name.to_string())
}

/// Keeps archive members flat so extracting them cannot leave the target directory.
fn archive_name(entry_name: &str) -> String {
    entry_name.replace(['/', '\\'], "_")
}

fn build_zip(files: Vec<(String, Vec<u8>)>) -> Result<Vec<u8>, ZipError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, bytes) in files {
        zip.start_file(name, options)?;
        zip.write_all(&bytes)?;
    }

    Ok(zip.finish()?.into_inner())
}

fn room_not_found() -> AppError {
    AppError::NotFound("Room not found".to_string())
}

fn entry_not_found() -> AppError {
    AppError::NotFound("Entry not found".to_string())
}

fn duplicate_entry() -> AppError {
    AppError::Conflict("An entry with this name already exists in this room".to_string())
}
