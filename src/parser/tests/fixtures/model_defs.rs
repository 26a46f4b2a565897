// Go model fixtures shared by the parser unit tests and the integration tests

pub const USER_MODEL: &str = r#"
// Package models holds the persisted entities.
package models

import (
	"time"

	"github.com/google/uuid"
)

// User is an account holder.
type User struct {
	ID        uuid.UUID `json:"id" db:"id"`
	FirstName, LastName string
	Email     string    `json:"email"`
	CreatedAt time.Time `json:"created_at"`
}
"#;

pub const COMPOSITE_FIELDS: &str = r#"
package models

type Inventory struct {
	Tags     []string
	Counts   map[string]int
	Owner    *User
	Digest   [32]byte
	Updates  <-chan Event
	Pending  chan<- Event
	Any      interface{}
	Page     Page[User]
	Lookup   map[uuid.UUID][]*Order `json:"lookup"`
}
"#;

pub const EMBEDDED_FIELDS: &str = r#"
package models

type Audited struct {
	Base
	*sync.Mutex
	gorm.Model
	Note string
}
"#;

pub const GROUPED_TYPES: &str = r#"
package models

type (
	// Order is placed by a user.
	Order struct {
		ID    int64
		Total float64 // in cents
	}

	Status string

	LineItem = struct {
		SKU string
	}
)

type Empty struct{}
"#;

pub const MIXED_DECLARATIONS: &str = r#"
package services

import "errors"

var ErrNotFound = errors.New("not found")

const pageSize = 50

type UserService struct {
	repo Repository
}

func NewUserService(repo Repository) *UserService {
	return &UserService{repo: repo}
}

func (s *UserService) Find(id int64) (*User, error) {
	return nil, ErrNotFound
}

type Repository interface {
	Get(id int64) (*User, error)
}
"#;

pub const INLINE_STRUCT_FIELD: &str = r#"
package models

type Settings struct {
	Theme struct {
		Dark bool
	}
}
"#;

pub const FUNC_FIELD: &str = r#"
package models

type Hook struct {
	Run func() error
}
"#;

pub const BROKEN_SYNTAX: &str = r#"
package models

type Broken struct {
	ID int
"#;

pub const EMPTY_STRUCT_ELEMENTS: &str = r#"
package models

type Role struct {
	Name string
}

type Membership struct {
	ID    int
	Roles map[string]struct{}
	Done  chan struct{}
	Marks []struct{}
}
"#;
